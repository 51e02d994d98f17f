//! HTTP API Layer
//!
//! This crate provides the REST API for the ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for accounts, transactions, transfers,
//!   limits, interest, and statements
//! - **Middleware**: Request tracing and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses mapped from domain errors
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, config::ApiConfig};
//!
//! let app = create_router(AppState::in_memory(ApiConfig::default()));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_ledger::{Ledger, Transaction};
use infra_mem::{InMemoryAccountStore, InMemoryTransactionLog};
use infra_notify::{RecordingSender, TransactionNotifier};

use crate::config::ApiConfig;
use crate::handlers::{accounts, health, interest, limits, statements, transactions, transfers};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub notifier: Arc<TransactionNotifier>,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds state over the in-memory store adapters
    pub fn in_memory(config: ApiConfig) -> Self {
        let ledger = Arc::new(Ledger::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(InMemoryTransactionLog::new()),
        ));
        let notifier = Arc::new(TransactionNotifier::new(Arc::new(RecordingSender::new())));
        Self {
            ledger,
            notifier,
            config,
        }
    }

    /// Dispatches an owner notification for a completed transaction
    ///
    /// Best-effort: resolution or delivery problems are logged by the
    /// notifier and never affect the response.
    pub(crate) fn notify(&self, transaction: &Transaction) {
        if let Ok(account) = self.ledger.account(transaction.account_id) {
            self.notifier.notify(transaction, &account.owner_name);
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Account routes
    let account_routes = Router::new()
        .route("/", post(accounts::open_account))
        .route("/", get(accounts::list_accounts))
        .route("/:id", get(accounts::get_account))
        .route("/:id/deposit", post(transactions::deposit))
        .route("/:id/withdraw", post(transactions::withdraw))
        .route("/:id/transactions", get(transactions::list_transactions))
        .route("/:id/limits", get(limits::get_limits))
        .route("/:id/limits", put(limits::update_limits))
        .route("/:id/interest/accrue", post(interest::accrue))
        .route("/:id/interest/apply", post(interest::apply))
        .route("/:id/interest/strategy", put(interest::set_strategy))
        .route(
            "/:id/statements/:year/:month",
            get(statements::get_statement),
        );

    // Transfer routes
    let transfer_routes = Router::new().route("/", post(transfers::create_transfer));

    let api_routes = Router::new()
        .nest("/accounts", account_routes)
        .nest("/transfers", transfer_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
