use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anvilcrm_core::{DomainError, DomainResult, ProductId};

/// Products with `stock` strictly below this value qualify for replenishment.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Fixed amount added to a qualifying product's stock per replenishment run.
pub const REPLENISH_AMOUNT: u32 = 10;

/// Product record.
///
/// `price` is an exact decimal; monetary values never pass through binary
/// floating point. `stock` is unsigned, so it cannot go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    stock: u32,
}

impl Product {
    /// Validate the fields and build a product record.
    pub fn create(id: ProductId, name: String, price: Decimal, stock: u32) -> DomainResult<Self> {
        let product = Self {
            id,
            name: name.trim().to_string(),
            price,
            stock,
        };
        product.validate()?;
        Ok(product)
    }

    /// Field sanity check: non-empty name and a strictly positive price.
    ///
    /// Also run after every stock mutation, mirroring the store-side
    /// save validation.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::validation("price must be positive"));
        }
        Ok(())
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Whether this product qualifies for replenishment.
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Copy of this product with [`REPLENISH_AMOUNT`] added to its stock.
    ///
    /// Uses checked arithmetic so an overflowing increment surfaces as an
    /// invariant violation instead of wrapping, and re-validates the result
    /// before it is handed to the store.
    pub fn replenished(&self) -> DomainResult<Self> {
        let stock = self
            .stock
            .checked_add(REPLENISH_AMOUNT)
            .ok_or_else(|| DomainError::invariant("stock increment overflowed"))?;
        let updated = Self {
            stock,
            ..self.clone()
        };
        updated.validate()?;
        Ok(updated)
    }
}
