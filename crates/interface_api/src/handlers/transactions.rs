//! Deposit, withdrawal, and history handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use core_kernel::{AccountId, Money};

use crate::dto::transaction::{AmountRequest, TransactionResponse};
use crate::{error::ApiError, AppState};

/// Deposits into an account
pub async fn deposit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let account_id = AccountId::from(id);
    let amount = Money::new(request.amount, request.currency);
    let tx = state
        .ledger
        .deposit(account_id, amount, request.description)?;

    state.notify(&tx);
    Ok(Json(tx.into()))
}

/// Withdraws from an account
pub async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let account_id = AccountId::from(id);
    let amount = Money::new(request.amount, request.currency);
    let tx = state
        .ledger
        .withdraw(account_id, amount, request.description)?;

    state.notify(&tx);
    Ok(Json(tx.into()))
}

/// Lists the transaction history of an account
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    let transactions = state.ledger.transactions(AccountId::from(id))?;
    Ok(Json(
        transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    ))
}
