//! Account domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur when opening or mutating an account
#[derive(Debug, Error)]
pub enum AccountError {
    /// Opening deposit was negative
    #[error("Initial deposit cannot be negative: {offered}")]
    NegativeInitialDeposit { offered: Decimal },

    /// Savings accounts require a minimum opening deposit
    #[error("Savings accounts require a minimum initial deposit of {required}, got {offered}")]
    MinimumOpeningDeposit { required: Decimal, offered: Decimal },

    /// Money arithmetic failed (currency mismatch)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
