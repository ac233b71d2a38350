//! `anvilcrm-store` — the data-store seam.
//!
//! [`CrmStore`] is the boundary the domain operations talk to: filtered
//! queries plus atomic single-record writes. The in-memory implementation
//! backs tests and the dev server; swapping in a database-backed store means
//! implementing this one trait.

pub mod memory;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvilcrm_core::{CustomerId, OrderId, ProductId};
use anvilcrm_customers::Customer;
use anvilcrm_orders::Order;
use anvilcrm_products::Product;

pub use memory::InMemoryStore;

/// Store error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Projection of an order carrying only what the revenue report reads.
///
/// `total_amount` is optional at this seam: a backing store may hold legacy
/// rows without a total, and the report treats those as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub total_amount: Option<Decimal>,
}

/// CRM record store.
///
/// Every write is an atomic single-record operation; there is no batch
/// transaction at this seam. Listing methods return records in ascending id
/// order so callers observe a deterministic sequence.
pub trait CrmStore: Send + Sync {
    /// Insert a new customer. Fails with `Conflict` on a duplicate email.
    fn insert_customer(&self, customer: Customer) -> Result<(), StoreError>;

    fn customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;

    fn customers(&self) -> Result<Vec<Customer>, StoreError>;

    fn customer_ids(&self) -> Result<Vec<CustomerId>, StoreError>;

    fn insert_product(&self, product: Product) -> Result<(), StoreError>;

    fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    fn products(&self) -> Result<Vec<Product>, StoreError>;

    /// Products with `stock` strictly below `threshold`, ascending id order.
    fn products_with_stock_below(&self, threshold: u32) -> Result<Vec<Product>, StoreError>;

    /// Overwrite an existing product record. Fails with `NotFound` if the
    /// product was never inserted.
    fn save_product(&self, product: Product) -> Result<(), StoreError>;

    fn insert_order(&self, order: Order) -> Result<(), StoreError>;

    fn orders(&self) -> Result<Vec<Order>, StoreError>;

    /// Orders with `order_date >= cutoff`, ascending id order.
    fn orders_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Order>, StoreError>;

    /// Id + total for every order (the revenue report's working set).
    fn order_summaries(&self) -> Result<Vec<OrderSummary>, StoreError>;
}
