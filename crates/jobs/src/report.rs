//! Revenue report aggregation.
//!
//! Folds every order's total into an exact decimal sum alongside customer
//! and order counts, then appends one line to the report log. The returned
//! report does not depend on the log write succeeding.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use anvilcrm_store::CrmStore;
use tracing::{info, warn};

use crate::job_log::{JobLog, STAMP_YMD};
use crate::JobError;

/// Computed report triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrmReport {
    pub customer_count: usize,
    pub order_count: usize,
    pub revenue: Decimal,
}

/// Aggregate counts and revenue from the store.
///
/// Orders without a total contribute zero (not an error); a store failure
/// aborts the whole aggregation so a partial total can never escape.
pub fn generate_report(store: &dyn CrmStore) -> Result<CrmReport, JobError> {
    let customer_count = store.customer_ids()?.len();
    let summaries = store.order_summaries()?;

    let order_count = summaries.len();
    let revenue: Decimal = summaries
        .iter()
        .filter_map(|s| s.total_amount)
        .sum();

    Ok(CrmReport {
        customer_count,
        order_count,
        revenue,
    })
}

/// Render the single report line (bit-exact external format).
pub fn report_entry(run_at: DateTime<Utc>, report: &CrmReport) -> String {
    format!(
        "{} - Report: {} customers, {} orders, {} revenue\n",
        run_at.format(STAMP_YMD),
        report.customer_count,
        report.order_count,
        report.revenue
    )
}

/// One scheduled run: aggregate, then append the report line.
///
/// The computed report is returned even if the append fails; the failure is
/// only logged. No line is written when aggregation itself fails.
pub fn run_report_job(store: &dyn CrmStore, log: &JobLog) -> Result<CrmReport, JobError> {
    let report = generate_report(store)?;

    if let Err(err) = log.append(&report_entry(Utc::now(), &report)) {
        warn!(error = %err, "failed to append report line");
    } else {
        info!(
            customers = report.customer_count,
            orders = report.order_count,
            revenue = %report.revenue,
            "report generated",
        );
    }
    Ok(report)
}
