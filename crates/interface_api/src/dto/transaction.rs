//! Transaction DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::Currency;
use domain_ledger::{Transaction, TransactionKind};

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Currency,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub source_account_id: Uuid,
    pub destination_account_id: Uuid,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Currency,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub currency: Currency,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_account_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_account_id: Option<Uuid>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: *tx.id.as_uuid(),
            account_id: *tx.account_id.as_uuid(),
            kind: tx.kind,
            amount: tx.amount.amount(),
            currency: tx.amount.currency(),
            timestamp: tx.timestamp,
            description: tx.description,
            source_account_id: tx.source_account_id.map(|id| *id.as_uuid()),
            destination_account_id: tx.destination_account_id.map(|id| *id.as_uuid()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub outgoing: TransactionResponse,
    pub incoming: TransactionResponse,
}
