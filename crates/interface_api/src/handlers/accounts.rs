//! Account handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use core_kernel::{AccountId, Money};

use crate::dto::account::{AccountResponse, OpenAccountRequest};
use crate::{error::ApiError, AppState};

/// Opens a new account
pub async fn open_account(
    State(state): State<AppState>,
    Json(request): Json<OpenAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let initial_deposit = Money::new(request.initial_deposit, request.currency);
    let account = state
        .ledger
        .open_account(request.account_type, request.owner_name, initial_deposit)?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Lists all accounts
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let accounts = state.ledger.accounts()?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// Gets an account by id
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.ledger.account(AccountId::from(id))?;
    Ok(Json(account.into()))
}
