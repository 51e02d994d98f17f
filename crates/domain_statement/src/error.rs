//! Statement generation errors

use thiserror::Error;

use core_kernel::{MoneyError, TemporalError};
use domain_ledger::LedgerError;

/// Errors raised while generating a statement
#[derive(Debug, Error)]
pub enum StatementError {
    /// The requested period is not a valid calendar month
    #[error(transparent)]
    Period(#[from] TemporalError),

    /// A ledger operation inside the generation sequence failed
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Statement arithmetic failed (currency mismatch across records)
    #[error(transparent)]
    Money(#[from] MoneyError),
}
