//! Statement handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use core_kernel::AccountId;
use domain_statement::StatementBuilder;

use crate::dto::statement::StatementResponse;
use crate::{error::ApiError, AppState};

/// Generates the monthly statement for an account
pub async fn get_statement(
    State(state): State<AppState>,
    Path((id, year, month)): Path<(Uuid, i32, u32)>,
) -> Result<Json<StatementResponse>, ApiError> {
    let builder = StatementBuilder::new(&state.ledger);
    let statement = builder.monthly_statement(AccountId::from(id), year, month)?;
    Ok(Json(statement.into()))
}
