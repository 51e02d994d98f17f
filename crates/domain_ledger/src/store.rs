//! Store ports
//!
//! The ledger core depends on these two contracts and nothing else for
//! persistence. Implementations must provide read-after-write visibility to
//! the same caller; they are not assumed to provide cross-account
//! transactions, so transfer atomicity remains the core's responsibility.

use chrono::{DateTime, Utc};
use thiserror::Error;

use core_kernel::AccountId;
use domain_account::Account;

use crate::transaction::Transaction;

/// Error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store accepted the request but failed internally
    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Key-value contract for account state
pub trait AccountStore: Send + Sync {
    /// Fetches an account by id, `None` if absent
    fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Inserts or replaces an account
    fn put(&self, account: Account) -> Result<(), StoreError>;

    /// Lists all accounts
    fn list(&self) -> Result<Vec<Account>, StoreError>;
}

/// Append-only contract for transaction records
pub trait TransactionLog: Send + Sync {
    /// Appends a record; records are never mutated afterwards
    fn append(&self, transaction: Transaction) -> Result<(), StoreError>;

    /// All records filed under an account, in append order
    fn by_account(&self, id: AccountId) -> Result<Vec<Transaction>, StoreError>;

    /// Records filed under an account within `[start, end)`
    fn by_account_in_range(
        &self,
        id: AccountId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError>;
}
