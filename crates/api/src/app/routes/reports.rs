use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};

use anvilcrm_jobs::report;

use crate::app::{errors, AppState};

pub fn router() -> Router {
    Router::new().route("/crm", get(crm_report))
}

/// Generate the CRM report and append the report line. The JSON payload is
/// returned even when the log append fails (the append is best-effort;
/// aggregation errors are not).
pub async fn crm_report(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    match report::run_report_job(state.store.as_ref(), &state.logs.report) {
        Ok(r) => Json(r).into_response(),
        Err(e) => errors::job_error_to_response(e),
    }
}
