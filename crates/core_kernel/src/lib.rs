//! Core Kernel - Foundational types for the ledger system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Local-time window handling for rolling limits and statement periods
//! - Strongly-typed identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError, Rate};
pub use temporal::{StatementPeriod, TemporalError, Timezone};
pub use identifiers::{AccountId, StatementId, TransactionId};
