use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use anvilcrm_core::CustomerId;
use anvilcrm_customers::{Customer, NewCustomer};

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route("/bulk", post(bulk_create_customers))
}

fn to_new_customer(req: dto::CreateCustomerRequest) -> NewCustomer {
    NewCustomer {
        name: req.name,
        email: req.email,
        phone: req.phone,
    }
}

pub async fn create_customer(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::CreateCustomerRequest>,
) -> axum::response::Response {
    let customer = match Customer::create(CustomerId::new(), to_new_customer(body)) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = state.store.insert_customer(customer.clone()) {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "customer": customer,
            "message": "Customer created successfully",
        })),
    )
        .into_response()
}

/// Bulk creation collects per-record errors and keeps going: valid records
/// are stored, invalid ones are reported by position.
pub async fn bulk_create_customers(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::BulkCreateCustomersRequest>,
) -> axum::response::Response {
    let mut created = Vec::new();
    let mut failures = Vec::new();

    for (i, req) in body.input.into_iter().enumerate() {
        let outcome = Customer::create(CustomerId::new(), to_new_customer(req))
            .map_err(|e| e.to_string())
            .and_then(|c| {
                state
                    .store
                    .insert_customer(c.clone())
                    .map(|_| c)
                    .map_err(|e| e.to_string())
            });
        match outcome {
            Ok(c) => created.push(c),
            Err(msg) => failures.push(format!("Customer {}: {}", i + 1, msg)),
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "customers": created,
            "errors": failures,
        })),
    )
        .into_response()
}

pub async fn list_customers(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    match state.store.customers() {
        Ok(customers) => Json(customers).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
