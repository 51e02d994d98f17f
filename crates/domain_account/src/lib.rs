//! Account Domain - Accounts, limits, and interest
//!
//! This crate owns the account aggregate and the business constraints that
//! travel with it:
//!
//! - **Account**: balance, status, and interest state for one customer account
//! - **Limits**: per-account rolling counters (daily withdrawal/transfer
//!   totals, monthly withdrawal count) with lazy window resets
//! - **Interest**: a closed set of accrual strategies (fixed rate, tiered)
//!   swappable per account at any time
//!
//! Balance mutations themselves are orchestrated by `domain_ledger`; this
//! crate only answers "may this debit happen" and "what interest has this
//! balance earned".

pub mod account;
pub mod error;
pub mod interest;
pub mod limits;

pub use account::{Account, AccountStatus, AccountType};
pub use error::AccountError;
pub use interest::{InterestStrategy, TierBand};
pub use limits::{LimitBreach, LimitTracker, LimitUsage, TransactionLimits, UsageLine};
