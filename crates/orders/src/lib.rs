//! `anvilcrm-orders` — order records and total-amount computation.

pub mod order;

pub use order::Order;
