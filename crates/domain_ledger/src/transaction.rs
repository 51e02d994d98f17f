//! Transaction records
//!
//! Records are immutable once created and append-only in the log. The amount
//! is always positive; direction is encoded by the kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Money, TransactionId};

/// Direction and origin of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    TransferIn,
    TransferOut,
}

impl TransactionKind {
    /// Returns true for kinds that increase the filed account's balance
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::TransferIn)
    }

    /// Returns true for kinds that decrease the filed account's balance
    pub fn is_debit(&self) -> bool {
        !self.is_credit()
    }
}

/// An immutable ledger entry filed under one account
///
/// A transfer produces exactly two records, one `TransferOut` under the
/// source and one `TransferIn` under the destination, sharing the same
/// amount and carrying both account ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Account this record is filed under
    pub account_id: AccountId,
    /// Entry kind
    pub kind: TransactionKind,
    /// Amount, always positive
    pub amount: Money,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Optional caller-supplied description
    pub description: Option<String>,
    /// Source account, populated for transfer kinds
    pub source_account_id: Option<AccountId>,
    /// Destination account, populated for transfer kinds
    pub destination_account_id: Option<AccountId>,
}

impl Transaction {
    fn record(account_id: AccountId, kind: TransactionKind, amount: Money) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            kind,
            amount,
            timestamp: Utc::now(),
            description: None,
            source_account_id: None,
            destination_account_id: None,
        }
    }

    /// Creates a deposit record
    pub fn deposit(account_id: AccountId, amount: Money) -> Self {
        Self::record(account_id, TransactionKind::Deposit, amount)
    }

    /// Creates a withdrawal record
    pub fn withdrawal(account_id: AccountId, amount: Money) -> Self {
        Self::record(account_id, TransactionKind::Withdrawal, amount)
    }

    /// Creates the outgoing half of a transfer, filed under the source
    pub fn transfer_out(source: AccountId, destination: AccountId, amount: Money) -> Self {
        let mut tx = Self::record(source, TransactionKind::TransferOut, amount);
        tx.source_account_id = Some(source);
        tx.destination_account_id = Some(destination);
        tx
    }

    /// Creates the incoming half of a transfer, filed under the destination
    pub fn transfer_in(source: AccountId, destination: AccountId, amount: Money) -> Self {
        let mut tx = Self::record(destination, TransactionKind::TransferIn, amount);
        tx.source_account_id = Some(source);
        tx.destination_account_id = Some(destination);
        tx
    }

    /// Attaches a description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}
