//! The monthly statement snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Money, StatementId, StatementPeriod};
use domain_ledger::Transaction;

/// An immutable snapshot of one account month
///
/// Produced by [`crate::StatementBuilder`]; never stored back into the
/// ledger. The opening balance is derived, not recorded, so the identity
/// `opening + net activity + interest = closing` holds by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyStatement {
    pub id: StatementId,
    pub account_id: AccountId,
    pub period: StatementPeriod,
    pub opening_balance: Money,
    pub closing_balance: Money,
    pub transactions: Vec<Transaction>,
    pub total_deposits: Money,
    pub total_withdrawals: Money,
    pub interest_earned: Money,
    pub fees: Money,
    pub generated_at: DateTime<Utc>,
}

impl MonthlyStatement {
    /// Number of transaction records covered by the statement
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}
