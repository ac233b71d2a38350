use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvilcrm_core::{CustomerId, DomainError, DomainResult, OrderId, ProductId};
use anvilcrm_products::Product;

/// Order record.
///
/// Immutable once placed: `total_amount` is fixed at creation time as the
/// exact decimal sum of the referenced products' prices, and later price
/// changes do not retroactively alter it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    product_ids: Vec<ProductId>,
    order_date: DateTime<Utc>,
    total_amount: Decimal,
}

impl Order {
    /// Place an order for the given products.
    ///
    /// The caller (the API layer) has already resolved the product ids
    /// against the store; this constructor enforces that the set is
    /// non-empty and derives the total.
    pub fn place(
        id: OrderId,
        customer_id: CustomerId,
        products: &[Product],
        order_date: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if products.is_empty() {
            return Err(DomainError::validation("order must contain at least one product"));
        }

        let total_amount: Decimal = products.iter().map(Product::price).sum();

        Ok(Self {
            id,
            customer_id,
            product_ids: products.iter().map(Product::id).collect(),
            order_date,
            total_amount,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn product_ids(&self) -> &[ProductId] {
        &self.product_ids
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }
}
