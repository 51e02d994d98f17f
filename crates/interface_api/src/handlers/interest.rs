//! Interest cycle handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use core_kernel::AccountId;

use crate::dto::account::{AccrueInterestRequest, InterestResponse, SetInterestStrategyRequest};
use crate::{error::ApiError, AppState};

/// Accrues interest up to a given instant (default: now)
pub async fn accrue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<AccrueInterestRequest>>,
) -> Result<Json<InterestResponse>, ApiError> {
    let as_of = request
        .and_then(|Json(r)| r.as_of)
        .unwrap_or_else(Utc::now);
    let accrued = state.ledger.accrue_interest(AccountId::from(id), as_of)?;
    Ok(Json(InterestResponse {
        account_id: id,
        amount: accrued.amount(),
        currency: accrued.currency(),
    }))
}

/// Capitalizes accrued interest into the balance
pub async fn apply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterestResponse>, ApiError> {
    let applied = state.ledger.capitalize_interest(AccountId::from(id))?;
    Ok(Json(InterestResponse {
        account_id: id,
        amount: applied.amount(),
        currency: applied.currency(),
    }))
}

/// Replaces the interest strategy of an account
pub async fn set_strategy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetInterestStrategyRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .ledger
        .set_interest_strategy(AccountId::from(id), request.strategy)?;
    Ok(Json(serde_json::json!({ "status": "updated" })))
}
