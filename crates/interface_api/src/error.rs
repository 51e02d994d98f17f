//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_ledger::LedgerError;
use domain_statement::StatementError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::InvalidAmount { .. } => ApiError::BadRequest(err.to_string()),
            LedgerError::AccountNotFound(_) => ApiError::NotFound(err.to_string()),
            LedgerError::InsufficientFunds { .. }
            | LedgerError::MinimumBalanceBreached { .. }
            | LedgerError::LimitExceeded { .. }
            | LedgerError::Money(_)
            | LedgerError::Account(_) => ApiError::Validation(err.to_string()),
            LedgerError::TransferFailed { .. } | LedgerError::Store(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<StatementError> for ApiError {
    fn from(err: StatementError) -> Self {
        match err {
            StatementError::Period(inner) => ApiError::BadRequest(inner.to_string()),
            StatementError::Ledger(inner) => inner.into(),
            StatementError::Money(inner) => ApiError::Validation(inner.to_string()),
        }
    }
}
