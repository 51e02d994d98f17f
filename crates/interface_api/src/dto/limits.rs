//! Limit DTOs

use rust_decimal::Decimal;
use serde::Deserialize;

use domain_account::TransactionLimits;

/// Full replacement of an account's limit thresholds
#[derive(Debug, Deserialize)]
pub struct UpdateLimitsRequest {
    pub daily_withdrawal_limit: Decimal,
    pub daily_transfer_limit: Decimal,
    pub monthly_withdrawal_count: u32,
    pub minimum_balance: Decimal,
}

impl From<UpdateLimitsRequest> for TransactionLimits {
    fn from(request: UpdateLimitsRequest) -> Self {
        Self {
            daily_withdrawal_limit: request.daily_withdrawal_limit,
            daily_transfer_limit: request.daily_transfer_limit,
            monthly_withdrawal_count: request.monthly_withdrawal_count,
            minimum_balance: request.minimum_balance,
        }
    }
}
