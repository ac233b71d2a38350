use axum::http::StatusCode;
use axum::Json;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Greeting endpoint.
pub async fn hello() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "hello": "Hello, CRM!" }))
}
