use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkCreateCustomersRequest {
    pub input: Vec<CreateCustomerRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    /// Decimal crossing the API boundary as a string, e.g. `"19.99"`.
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub product_ids: Vec<String>,
    /// Defaults to the current time when omitted.
    pub order_date: Option<DateTime<Utc>>,
}
