//! Monthly Statements
//!
//! Derives immutable monthly statement snapshots from the ledger. A statement
//! closes the interest cycle for the month (accrue, capture, capitalize) and
//! then reconstructs the opening balance from the closing balance and the
//! month's activity, so the figures always reconcile by construction.

pub mod builder;
pub mod error;
pub mod statement;

pub use builder::StatementBuilder;
pub use error::StatementError;
pub use statement::MonthlyStatement;
