//! Account DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::Currency;
use domain_account::{Account, AccountStatus, AccountType, InterestStrategy};

#[derive(Debug, Deserialize)]
pub struct OpenAccountRequest {
    pub owner_name: String,
    pub account_type: AccountType,
    pub initial_deposit: Decimal,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Debug, Deserialize)]
pub struct SetInterestStrategyRequest {
    pub strategy: InterestStrategy,
}

#[derive(Debug, Deserialize)]
pub struct AccrueInterestRequest {
    /// Accrue up to this instant; defaults to now
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct InterestResponse {
    pub account_id: Uuid,
    pub amount: Decimal,
    pub currency: Currency,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub owner_name: String,
    pub account_type: AccountType,
    pub status: AccountStatus,
    pub balance: Decimal,
    pub currency: Currency,
    pub accrued_interest: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: *account.id.as_uuid(),
            owner_name: account.owner_name,
            account_type: account.account_type,
            status: account.status,
            balance: account.balance.amount(),
            currency: account.balance.currency(),
            accrued_interest: account.accrued_interest.amount(),
            created_at: account.created_at,
        }
    }
}
