//! In-memory transaction log

use std::sync::RwLock;

use chrono::{DateTime, Utc};

use core_kernel::AccountId;
use domain_ledger::{StoreError, Transaction, TransactionLog};

/// Append-only transaction log backed by a `RwLock<Vec>`
///
/// Records are returned in append order; nothing is ever removed or mutated.
#[derive(Debug, Default)]
pub struct InMemoryTransactionLog {
    records: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all accounts
    pub fn len(&self) -> usize {
        self.records.read().expect("transaction log poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionLog for InMemoryTransactionLog {
    fn append(&self, transaction: Transaction) -> Result<(), StoreError> {
        let mut records = self.records.write().expect("transaction log poisoned");
        records.push(transaction);
        Ok(())
    }

    fn by_account(&self, id: AccountId) -> Result<Vec<Transaction>, StoreError> {
        let records = self.records.read().expect("transaction log poisoned");
        Ok(records
            .iter()
            .filter(|tx| tx.account_id == id)
            .cloned()
            .collect())
    }

    fn by_account_in_range(
        &self,
        id: AccountId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        let records = self.records.read().expect("transaction log poisoned");
        Ok(records
            .iter()
            .filter(|tx| tx.account_id == id && tx.timestamp >= start && tx.timestamp < end)
            .cloned()
            .collect())
    }
}
