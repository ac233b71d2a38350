//! Low-stock replenishment.
//!
//! Scans for products with stock below the threshold, bumps each by the
//! fixed replenishment amount, and persists the new stock one record at a
//! time. The log entry format is consumed by external tooling and must not
//! drift (see tests).

use chrono::{DateTime, Local};
use serde::Serialize;

use anvilcrm_products::Product;
use anvilcrm_store::CrmStore;
use tracing::{info, warn};

use crate::job_log::{JobLog, STAMP_DMY};
use crate::JobError;

const SEPARATOR: &str =
    "============================================================";

/// Outcome of a replenishment run.
#[derive(Debug, Clone, Serialize)]
pub struct Replenishment {
    pub updated: Vec<Product>,
    pub success: bool,
    pub message: String,
}

/// Replenish every product with stock below [`anvilcrm_products::LOW_STOCK_THRESHOLD`].
///
/// Matching products are processed in ascending id order. An empty match set
/// is a success, not an error. Any validation or store failure aborts the
/// whole run; increments already persisted stay persisted, since the store
/// seam only offers single-record writes.
pub fn replenish_low_stock(store: &dyn CrmStore) -> Result<Replenishment, JobError> {
    let candidates = store.products_with_stock_below(anvilcrm_products::LOW_STOCK_THRESHOLD)?;

    if candidates.is_empty() {
        return Ok(Replenishment {
            updated: Vec::new(),
            success: true,
            message: "No low-stock products found".to_string(),
        });
    }

    let mut updated = Vec::with_capacity(candidates.len());
    for product in candidates {
        let bumped = product.replenished()?;
        store.save_product(bumped.clone())?;
        updated.push(bumped);
    }

    let message = format!("Successfully updated {} low-stock products", updated.len());
    Ok(Replenishment {
        updated,
        success: true,
        message,
    })
}

/// Render the log block for a completed run (bit-exact external format).
pub fn low_stock_entry(run_at: DateTime<Local>, outcome: &Replenishment) -> String {
    let mut entry = String::new();
    entry.push_str(SEPARATOR);
    entry.push('\n');
    entry.push_str(&format!("Update Time: {}\n", run_at.format(STAMP_DMY)));
    entry.push_str(&format!(
        "Status: {}\n",
        if outcome.success { "SUCCESS" } else { "FAILED" }
    ));
    entry.push_str(&format!("Message: {}\n", outcome.message));
    entry.push_str(&format!("Total Products Updated: {}\n", outcome.updated.len()));
    entry.push_str(SEPARATOR);
    entry.push('\n');

    if outcome.updated.is_empty() {
        entry.push_str("No products were updated\n");
    } else {
        entry.push_str("Updated Products:\n");
        for product in &outcome.updated {
            entry.push_str(&format!(
                "  - {}: New Stock = {}\n",
                product.name(),
                product.stock()
            ));
        }
    }
    entry
}

/// Render the error-marker line for a failed run.
pub fn low_stock_error_entry(run_at: DateTime<Local>, message: &str) -> String {
    format!("{} ERROR: {}\n", run_at.format(STAMP_DMY), message)
}

/// One scheduled run: replenish, then append the outcome to the low-stock log.
pub fn run_low_stock_job(store: &dyn CrmStore, log: &JobLog) -> Result<Replenishment, JobError> {
    let run_at = Local::now();
    match replenish_low_stock(store) {
        Ok(outcome) => {
            log.append(&low_stock_entry(run_at, &outcome))?;
            info!(updated = outcome.updated.len(), "low-stock replenishment complete");
            Ok(outcome)
        }
        Err(err) => {
            // Best-effort error marker; the job error is what propagates.
            if let Err(log_err) = log.append(&low_stock_error_entry(run_at, &err.to_string())) {
                warn!(error = %log_err, "failed to append low-stock error marker");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvilcrm_core::ProductId;
    use anvilcrm_store::{InMemoryStore, StoreError};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn product(name: &str, stock: u32) -> Product {
        Product::create(ProductId::new(), name.to_string(), dec!(2.50), stock).unwrap()
    }

    fn run_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn updates_exactly_the_low_stock_subset() {
        let store = InMemoryStore::new();
        let low = product("Bolts", 5);
        let high = product("Nuts", 15);
        let empty = product("Washers", 0);
        for p in [&low, &high, &empty] {
            store.insert_product(p.clone()).unwrap();
        }

        let outcome = replenish_low_stock(&store).unwrap();

        assert!(outcome.success);
        assert!(outcome.message.contains('2'), "message: {}", outcome.message);
        assert_eq!(outcome.updated.len(), 2);

        assert_eq!(store.product(low.id()).unwrap().unwrap().stock(), 15);
        assert_eq!(store.product(empty.id()).unwrap().unwrap().stock(), 10);
        // Above-threshold product is untouched.
        assert_eq!(store.product(high.id()).unwrap().unwrap().stock(), 15);
    }

    #[test]
    fn empty_match_set_is_a_success() {
        let store = InMemoryStore::new();
        store.insert_product(product("Nuts", 15)).unwrap();

        let outcome = replenish_low_stock(&store).unwrap();
        assert!(outcome.success);
        assert!(outcome.updated.is_empty());
        assert_eq!(outcome.message, "No low-stock products found");
    }

    #[test]
    fn selection_is_re_evaluated_each_run() {
        // No dedup, no memory between runs: the second run re-applies the
        // threshold predicate to current stock. With +10 per run every
        // updated product lands at >= 10, so it no longer matches.
        let store = InMemoryStore::new();
        let p = product("Bolts", 0);
        store.insert_product(p.clone()).unwrap();

        let first = replenish_low_stock(&store).unwrap();
        assert_eq!(first.updated.len(), 1);
        assert_eq!(store.product(p.id()).unwrap().unwrap().stock(), 10);

        let second = replenish_low_stock(&store).unwrap();
        assert!(second.updated.is_empty());
        assert_eq!(store.product(p.id()).unwrap().unwrap().stock(), 10);

        // If stock drops back under the threshold the product is picked
        // up again and bumped by another 10.
        let drained = Product::create(p.id(), "Bolts".to_string(), dec!(2.50), 3).unwrap();
        store.save_product(drained).unwrap();
        let third = replenish_low_stock(&store).unwrap();
        assert_eq!(third.updated.len(), 1);
        assert_eq!(store.product(p.id()).unwrap().unwrap().stock(), 13);
    }

    #[test]
    fn candidates_are_processed_in_ascending_id_order() {
        let store = InMemoryStore::new();
        let a = product("A", 1);
        let b = product("B", 2);
        let c = product("C", 3);
        for p in [&c, &a, &b] {
            store.insert_product(p.clone()).unwrap();
        }

        let outcome = replenish_low_stock(&store).unwrap();
        let mut expected = vec![a.id(), b.id(), c.id()];
        expected.sort();
        let got: Vec<_> = outcome.updated.iter().map(|p| p.id()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn success_entry_matches_external_format() {
        let outcome = Replenishment {
            updated: vec![
                product("Bolts", 15),
                product("Washers", 10),
            ],
            success: true,
            message: "Successfully updated 2 low-stock products".to_string(),
        };

        let entry = low_stock_entry(run_at(), &outcome);
        let sep = "=".repeat(60);
        assert_eq!(
            entry,
            format!(
                "{sep}\n\
                 Update Time: 02/01/2026-03:04:05\n\
                 Status: SUCCESS\n\
                 Message: Successfully updated 2 low-stock products\n\
                 Total Products Updated: 2\n\
                 {sep}\n\
                 Updated Products:\n  \
                 - Bolts: New Stock = 15\n  \
                 - Washers: New Stock = 10\n"
            )
        );
    }

    #[test]
    fn empty_entry_reports_no_updates() {
        let outcome = Replenishment {
            updated: vec![],
            success: true,
            message: "No low-stock products found".to_string(),
        };
        let entry = low_stock_entry(run_at(), &outcome);
        assert!(entry.ends_with("No products were updated\n"));
        assert!(entry.contains("Total Products Updated: 0\n"));
    }

    #[test]
    fn error_entry_is_a_single_marker_line() {
        let entry = low_stock_error_entry(run_at(), "store unavailable: down");
        assert_eq!(entry, "02/01/2026-03:04:05 ERROR: store unavailable: down\n");
    }

    #[test]
    fn run_appends_to_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = JobLog::open(dir.path().join("low_stock.txt")).unwrap();
        let store = InMemoryStore::new();
        store.insert_product(product("Bolts", 5)).unwrap();

        run_low_stock_job(&store, &log).unwrap();
        run_low_stock_job(&store, &log).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        // First run updates Bolts, second finds nothing; both entries remain.
        assert!(content.contains("- Bolts: New Stock = 15"));
        assert!(content.contains("No products were updated"));
    }

    /// Store wrapper whose writes fail, for the fail-fast path.
    struct BrokenWrites(InMemoryStore);

    impl CrmStore for BrokenWrites {
        fn insert_customer(&self, c: anvilcrm_customers::Customer) -> Result<(), StoreError> {
            self.0.insert_customer(c)
        }
        fn customer(
            &self,
            id: anvilcrm_core::CustomerId,
        ) -> Result<Option<anvilcrm_customers::Customer>, StoreError> {
            self.0.customer(id)
        }
        fn customers(&self) -> Result<Vec<anvilcrm_customers::Customer>, StoreError> {
            self.0.customers()
        }
        fn customer_ids(&self) -> Result<Vec<anvilcrm_core::CustomerId>, StoreError> {
            self.0.customer_ids()
        }
        fn insert_product(&self, p: Product) -> Result<(), StoreError> {
            self.0.insert_product(p)
        }
        fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
            self.0.product(id)
        }
        fn products(&self) -> Result<Vec<Product>, StoreError> {
            self.0.products()
        }
        fn products_with_stock_below(&self, t: u32) -> Result<Vec<Product>, StoreError> {
            self.0.products_with_stock_below(t)
        }
        fn save_product(&self, _: Product) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("write refused".to_string()))
        }
        fn insert_order(&self, o: anvilcrm_orders::Order) -> Result<(), StoreError> {
            self.0.insert_order(o)
        }
        fn orders(&self) -> Result<Vec<anvilcrm_orders::Order>, StoreError> {
            self.0.orders()
        }
        fn orders_since(
            &self,
            cutoff: chrono::DateTime<chrono::Utc>,
        ) -> Result<Vec<anvilcrm_orders::Order>, StoreError> {
            self.0.orders_since(cutoff)
        }
        fn order_summaries(&self) -> Result<Vec<anvilcrm_store::OrderSummary>, StoreError> {
            self.0.order_summaries()
        }
    }

    #[test]
    fn write_failure_aborts_the_run() {
        let store = BrokenWrites(InMemoryStore::new());
        store.insert_product(product("Bolts", 5)).unwrap();

        let err = replenish_low_stock(&store).unwrap_err();
        assert!(matches!(err, JobError::Store(StoreError::Unavailable(_))));
    }

    #[test]
    fn failed_run_appends_error_marker() {
        let dir = tempfile::tempdir().unwrap();
        let log = JobLog::open(dir.path().join("low_stock.txt")).unwrap();
        let store = BrokenWrites(InMemoryStore::new());
        store.insert_product(product("Bolts", 5)).unwrap();

        run_low_stock_job(&store, &log).unwrap_err();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.contains("ERROR: store unavailable: write refused"));
        assert!(!content.contains("Status: SUCCESS"));
    }
}
