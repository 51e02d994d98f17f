//! Limit handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use core_kernel::AccountId;
use domain_account::{LimitUsage, TransactionLimits};

use crate::dto::limits::UpdateLimitsRequest;
use crate::{error::ApiError, AppState};

/// Reports limit usage for an account
pub async fn get_limits(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LimitUsage>, ApiError> {
    let usage = state.ledger.limit_usage(AccountId::from(id))?;
    Ok(Json(usage))
}

/// Replaces the limit thresholds of an account
pub async fn update_limits(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLimitsRequest>,
) -> Result<Json<TransactionLimits>, ApiError> {
    let limits = state
        .ledger
        .update_limits(AccountId::from(id), request.into())?;
    Ok(Json(limits))
}
