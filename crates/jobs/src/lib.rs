//! `anvilcrm-jobs` — the periodic CRM jobs and the operations behind them.
//!
//! Two of these carry real logic: low-stock replenishment ([`replenish`])
//! and the revenue report ([`report`]). The heartbeat and order-reminder
//! jobs are thin read+log probes. [`scheduler`] wires all four onto tokio
//! intervals with a bounded per-run timeout.

pub mod heartbeat;
pub mod job_log;
pub mod reminders;
pub mod replenish;
pub mod report;
pub mod scheduler;

use anvilcrm_core::DomainError;
use anvilcrm_store::StoreError;

pub use heartbeat::Reachability;
pub use job_log::{JobLog, JobLogs};
pub use replenish::Replenishment;
pub use report::CrmReport;
pub use scheduler::{Scheduler, SchedulerConfig};

/// Error from a job run.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("log write failed: {0}")]
    Log(#[from] std::io::Error),

    #[error("job timed out after {0:?}")]
    Timeout(std::time::Duration),
}
