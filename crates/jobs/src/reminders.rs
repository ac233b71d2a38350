//! Order reminders.
//!
//! Lists orders placed within the reminder window (last 7 days) and appends
//! one reminder line per order, with the customer's email resolved from the
//! store.

use chrono::{DateTime, Duration, Utc};

use anvilcrm_store::CrmStore;
use tracing::info;

use crate::job_log::{JobLog, STAMP_YMD};
use crate::JobError;

/// How far back the reminder scan reaches.
pub const REMINDER_WINDOW_DAYS: i64 = 7;

/// Scan orders since `now - 7 days` and append one reminder line per order.
/// Returns the number of reminders written.
pub fn run_order_reminders_job(store: &dyn CrmStore, log: &JobLog) -> Result<usize, JobError> {
    let now = Utc::now();
    let cutoff = now - Duration::days(REMINDER_WINDOW_DAYS);
    let orders = store.orders_since(cutoff)?;

    if orders.is_empty() {
        log.append(&no_orders_entry(now))?;
        return Ok(0);
    }

    let mut entry = String::new();
    for order in &orders {
        let email = store
            .customer(order.customer_id())?
            .map(|c| c.email().to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        entry.push_str(&reminder_line(now, &order.id().to_string(), &email));
    }
    log.append(&entry)?;

    info!(count = orders.len(), "order reminders logged");
    Ok(orders.len())
}

fn reminder_line(run_at: DateTime<Utc>, order_id: &str, email: &str) -> String {
    format!(
        "[{}] Order ID: {}, Customer Email: {}\n",
        run_at.format(STAMP_YMD),
        order_id,
        email
    )
}

fn no_orders_entry(run_at: DateTime<Utc>) -> String {
    format!("[{}] No orders found for reminders.\n", run_at.format(STAMP_YMD))
}
