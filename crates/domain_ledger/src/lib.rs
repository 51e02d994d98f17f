//! Ledger Core - Balance and transaction consistency
//!
//! This crate orchestrates every balance mutation in the system and keeps the
//! account store and the append-only transaction log consistent with each
//! other.
//!
//! # Invariants
//!
//! - A deposit or withdrawal produces exactly one transaction record; a
//!   transfer produces exactly two cross-referencing records
//! - All validation (amount, funds, minimum balance, rolling limits) happens
//!   before any mutation; rejected operations leave no trace
//! - Transfers conserve money: the sum of the two balances is unchanged
//! - Concurrent operations on the same account are serialized per account id;
//!   transfers take both critical sections in ascending account-id order
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::Ledger;
//!
//! let ledger = Ledger::new(account_store, transaction_log);
//! let account = ledger.open_account(AccountType::Savings, "Alice", deposit)?;
//! ledger.deposit(account.id, amount, None)?;
//! ```

pub mod error;
pub mod ledger;
pub mod store;
pub mod transaction;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use store::{AccountStore, StoreError, TransactionLog};
pub use transaction::{Transaction, TransactionKind};
