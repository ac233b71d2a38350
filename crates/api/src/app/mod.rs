//! HTTP API application wiring (Axum router + state wiring).
//!
//! Structure:
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};

use anvilcrm_jobs::JobLogs;
use anvilcrm_store::CrmStore;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared state injected into every handler.
///
/// The store client is constructed once per process and passed by reference;
/// there is no module-level singleton.
pub struct AppState {
    pub store: Arc<dyn CrmStore>,
    pub logs: Arc<JobLogs>,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .route("/hello", get(routes::system::hello))
        .merge(routes::router())
        .layer(Extension(state))
}
