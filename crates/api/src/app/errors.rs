use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use anvilcrm_core::DomainError;
use anvilcrm_jobs::JobError;
use anvilcrm_store::StoreError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Unavailable(msg) => json_error(StatusCode::BAD_GATEWAY, "store_error", msg),
    }
}

pub fn job_error_to_response(err: JobError) -> axum::response::Response {
    match err {
        JobError::Store(e) => store_error_to_response(e),
        JobError::Domain(e) => domain_error_to_response(e),
        JobError::Log(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "log_error",
            e.to_string(),
        ),
        JobError::Timeout(d) => json_error(
            StatusCode::GATEWAY_TIMEOUT,
            "timeout",
            format!("operation timed out after {d:?}"),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
