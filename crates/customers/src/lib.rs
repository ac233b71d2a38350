//! `anvilcrm-customers` — customer records and their field validation.

pub mod customer;

pub use customer::{Customer, NewCustomer};
