//! Statement DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use core_kernel::Currency;
use domain_statement::MonthlyStatement;

use crate::dto::transaction::TransactionResponse;

#[derive(Debug, Serialize)]
pub struct StatementResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub currency: Currency,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub interest_earned: Decimal,
    pub fees: Decimal,
    pub transactions: Vec<TransactionResponse>,
    pub generated_at: DateTime<Utc>,
}

impl From<MonthlyStatement> for StatementResponse {
    fn from(statement: MonthlyStatement) -> Self {
        Self {
            id: *statement.id.as_uuid(),
            account_id: *statement.account_id.as_uuid(),
            year: statement.period.year(),
            month: statement.period.month(),
            currency: statement.closing_balance.currency(),
            opening_balance: statement.opening_balance.amount(),
            closing_balance: statement.closing_balance.amount(),
            total_deposits: statement.total_deposits.amount(),
            total_withdrawals: statement.total_withdrawals.amount(),
            interest_earned: statement.interest_earned.amount(),
            fees: statement.fees.amount(),
            transactions: statement
                .transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect(),
            generated_at: statement.generated_at,
        }
    }
}
