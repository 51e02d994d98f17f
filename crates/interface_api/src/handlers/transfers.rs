//! Transfer handlers

use axum::{extract::State, http::StatusCode, Json};

use core_kernel::{AccountId, Money};

use crate::dto::transaction::{TransferRequest, TransferResponse};
use crate::{error::ApiError, AppState};

/// Transfers between two accounts
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<(StatusCode, Json<TransferResponse>), ApiError> {
    let source_id = AccountId::from(request.source_account_id);
    let destination_id = AccountId::from(request.destination_account_id);
    let amount = Money::new(request.amount, request.currency);

    let (outgoing, incoming) =
        state
            .ledger
            .transfer(source_id, destination_id, amount, request.description)?;

    state.notify(&outgoing);
    state.notify(&incoming);

    Ok((
        StatusCode::CREATED,
        Json(TransferResponse {
            outgoing: outgoing.into(),
            incoming: incoming.into(),
        }),
    ))
}
