//! In-memory store for tests and the dev server.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use anvilcrm_core::{CustomerId, OrderId, ProductId};
use anvilcrm_customers::Customer;
use anvilcrm_orders::Order;
use anvilcrm_products::Product;

use crate::{CrmStore, OrderSummary, StoreError};

/// In-memory [`CrmStore`] backed by `RwLock`ed maps.
///
/// Single-record reads and writes are atomic (one lock acquisition each),
/// matching the trait contract.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    customers: RwLock<HashMap<CustomerId, Customer>>,
    products: RwLock<HashMap<ProductId, Product>>,
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

fn sorted_by_id<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(key);
    items
}

impl CrmStore for InMemoryStore {
    fn insert_customer(&self, customer: Customer) -> Result<(), StoreError> {
        let mut customers = self.customers.write().unwrap();
        if customers
            .values()
            .any(|c| c.email().eq_ignore_ascii_case(customer.email()))
        {
            return Err(StoreError::Conflict(format!(
                "email already exists: {}",
                customer.email()
            )));
        }
        customers.insert(customer.id(), customer);
        Ok(())
    }

    fn customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.read().unwrap().get(&id).cloned())
    }

    fn customers(&self) -> Result<Vec<Customer>, StoreError> {
        let customers = self.customers.read().unwrap();
        Ok(sorted_by_id(customers.values().cloned().collect(), Customer::id))
    }

    fn customer_ids(&self) -> Result<Vec<CustomerId>, StoreError> {
        let customers = self.customers.read().unwrap();
        Ok(sorted_by_id(customers.keys().copied().collect(), |id| *id))
    }

    fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        self.products
            .write()
            .unwrap()
            .insert(product.id(), product);
        Ok(())
    }

    fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().unwrap().get(&id).cloned())
    }

    fn products(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().unwrap();
        Ok(sorted_by_id(products.values().cloned().collect(), Product::id))
    }

    fn products_with_stock_below(&self, threshold: u32) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().unwrap();
        let matching = products
            .values()
            .filter(|p| p.stock() < threshold)
            .cloned()
            .collect();
        Ok(sorted_by_id(matching, Product::id))
    }

    fn save_product(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.products.write().unwrap();
        if !products.contains_key(&product.id()) {
            return Err(StoreError::NotFound);
        }
        products.insert(product.id(), product);
        Ok(())
    }

    fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        self.orders.write().unwrap().insert(order.id(), order);
        Ok(())
    }

    fn orders(&self) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().unwrap();
        Ok(sorted_by_id(orders.values().cloned().collect(), Order::id))
    }

    fn orders_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().unwrap();
        let recent = orders
            .values()
            .filter(|o| o.order_date() >= cutoff)
            .cloned()
            .collect();
        Ok(sorted_by_id(recent, Order::id))
    }

    fn order_summaries(&self) -> Result<Vec<OrderSummary>, StoreError> {
        let orders = self.orders.read().unwrap();
        let summaries = orders
            .values()
            .map(|o| OrderSummary {
                id: o.id(),
                total_amount: Some(o.total_amount()),
            })
            .collect();
        Ok(sorted_by_id(summaries, |s: &OrderSummary| s.id))
    }
}
