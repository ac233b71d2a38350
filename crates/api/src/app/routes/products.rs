use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Local;

use anvilcrm_core::ProductId;
use anvilcrm_jobs::replenish;
use anvilcrm_products::Product;

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/low-stock/replenish", post(replenish_low_stock))
}

pub async fn create_product(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let product = match Product::create(ProductId::new(), body.name, body.price, body.stock) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = state.store.insert_product(product.clone()) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(product)).into_response()
}

pub async fn list_products(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    match state.store.products() {
        Ok(products) => Json(products).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// The `updateLowStockProducts` mutation: replenish every product below the
/// threshold and append the outcome to the low-stock log.
pub async fn replenish_low_stock(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    let run_at = Local::now();
    match replenish::replenish_low_stock(state.store.as_ref()) {
        Ok(outcome) => {
            if let Err(e) = state
                .logs
                .low_stock
                .append(&replenish::low_stock_entry(run_at, &outcome))
            {
                tracing::warn!(error = %e, "failed to append low-stock log entry");
            }
            Json(serde_json::json!({
                "updated_products": outcome.updated,
                "success": outcome.success,
                "message": outcome.message,
            }))
            .into_response()
        }
        Err(e) => {
            if let Err(log_err) = state
                .logs
                .low_stock
                .append(&replenish::low_stock_error_entry(run_at, &e.to_string()))
            {
                tracing::warn!(error = %log_err, "failed to append low-stock error marker");
            }
            errors::job_error_to_response(e)
        }
    }
}
