//! Ledger error taxonomy
//!
//! Every variant carries the account id, attempted amount, or limit figures
//! involved, so callers can build a user-facing message without re-querying
//! the store.

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{AccountId, MoneyError};
use domain_account::{AccountError, LimitBreach};

use crate::store::StoreError;

/// Errors returned by ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Amount was zero or negative
    #[error("Amount must be positive, got {amount}")]
    InvalidAmount { amount: Decimal },

    /// The account id did not resolve
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// A debit exceeded the available balance
    #[error("Insufficient funds in {account_id}: balance {balance}, attempted {attempted}")]
    InsufficientFunds {
        account_id: AccountId,
        balance: Decimal,
        attempted: Decimal,
    },

    /// A withdrawal would leave the balance under the configured floor
    #[error(
        "Withdrawal from {account_id} would breach minimum balance {minimum}: would leave {resulting}"
    )]
    MinimumBalanceBreached {
        account_id: AccountId,
        minimum: Decimal,
        resulting: Decimal,
    },

    /// A rolling limit would be exceeded
    #[error("Limit exceeded on {account_id}: {breach}")]
    LimitExceeded {
        account_id: AccountId,
        #[source]
        breach: LimitBreach,
    },

    /// A transfer failed partway through its persist sequence
    ///
    /// The in-memory debit and credit had already been computed; `stage`
    /// names the first persist step that failed so the caller can inspect
    /// ledger state and reconcile. The core performs no automatic
    /// compensation.
    #[error(
        "Transfer of {amount} from {source_id} to {destination_id} failed at {stage}: {source}"
    )]
    TransferFailed {
        source_id: AccountId,
        destination_id: AccountId,
        amount: Decimal,
        stage: &'static str,
        #[source]
        source: StoreError,
    },

    /// Store failure during a single-account operation
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Money arithmetic failure (currency mismatch)
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Account-level rule violation (opening rules, interest arithmetic)
    #[error(transparent)]
    Account(#[from] AccountError),
}

impl LedgerError {
    /// Returns true if the error was raised before any mutation
    ///
    /// `TransferFailed` and `Store` may leave observable partial state; all
    /// other variants are pre-mutation rejections.
    pub fn is_clean_rejection(&self) -> bool {
        !matches!(
            self,
            LedgerError::TransferFailed { .. } | LedgerError::Store(_)
        )
    }
}
