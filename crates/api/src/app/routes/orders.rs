use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use anvilcrm_core::{CustomerId, OrderId, ProductId};
use anvilcrm_orders::Order;

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new().route("/", post(create_order).get(list_orders))
}

pub async fn create_order(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let customer_id: CustomerId = match body.customer_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let customer = match state.store.customer(customer_id) {
        Ok(Some(c)) => c,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found")
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    if body.product_ids.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "order must contain at least one product",
        );
    }

    // Resolve every product id; any unknown id fails the whole request.
    let mut products = Vec::with_capacity(body.product_ids.len());
    for raw in &body.product_ids {
        let product_id: ProductId = match raw.parse() {
            Ok(id) => id,
            Err(e) => return errors::domain_error_to_response(e),
        };
        match state.store.product(product_id) {
            Ok(Some(p)) => products.push(p),
            Ok(None) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    format!("invalid product id: {raw}"),
                )
            }
            Err(e) => return errors::store_error_to_response(e),
        }
    }

    let order_date = body.order_date.unwrap_or_else(Utc::now);
    let order = match Order::place(OrderId::new(), customer.id(), &products, order_date) {
        Ok(o) => o,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = state.store.insert_order(order.clone()) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(order)).into_response()
}

pub async fn list_orders(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    match state.store.orders() {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
