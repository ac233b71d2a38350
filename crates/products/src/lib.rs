//! `anvilcrm-products` — product records, pricing, and low-stock rules.

pub mod product;

pub use product::{Product, LOW_STOCK_THRESHOLD, REPLENISH_AMOUNT};
