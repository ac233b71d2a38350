//! Periodic job scheduling.
//!
//! One tokio task per job, each driven by its own interval, so sibling runs
//! of the same job never overlap. Every run is bounded by a timeout; a run
//! that fails or times out is logged and the schedule keeps going.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{error, info};

use anvilcrm_store::CrmStore;

use crate::job_log::JobLogs;
use crate::{heartbeat, reminders, replenish, report, JobError};

/// Periods and bounds for the four scheduled jobs.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub heartbeat_every: Duration,
    pub replenish_every: Duration,
    pub reminders_every: Duration,
    pub report_every: Duration,
    /// Upper bound on any single job run.
    pub job_timeout: Duration,
    /// URL the heartbeat probes.
    pub health_url: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            heartbeat_every: Duration::from_secs(5 * 60),
            replenish_every: Duration::from_secs(12 * 60 * 60),
            reminders_every: Duration::from_secs(24 * 60 * 60),
            report_every: Duration::from_secs(7 * 24 * 60 * 60),
            job_timeout: Duration::from_secs(30),
            health_url: "http://127.0.0.1:8080/health".to_string(),
        }
    }
}

/// Handle to the spawned job tasks.
pub struct Scheduler {
    tasks: Vec<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawn all four periodic jobs. The first run of each job happens one
    /// full period after spawn, not immediately.
    pub fn spawn(store: Arc<dyn CrmStore>, logs: Arc<JobLogs>, config: SchedulerConfig) -> Self {
        let client = reqwest::Client::new();
        let bound = config.job_timeout;

        let heartbeat_task = {
            let logs = logs.clone();
            let url = config.health_url.clone();
            spawn_periodic("heartbeat", config.heartbeat_every, move || {
                let client = client.clone();
                let logs = logs.clone();
                let url = url.clone();
                async move {
                    heartbeat::run_heartbeat_job(&client, &url, &logs.heartbeat)
                        .await
                        .map(|_| ())
                }
            })
        };

        let replenish_task = {
            let store = store.clone();
            let logs = logs.clone();
            spawn_periodic("low_stock_replenishment", config.replenish_every, move || {
                let store = store.clone();
                let logs = logs.clone();
                blocking(bound, move || {
                    replenish::run_low_stock_job(store.as_ref(), &logs.low_stock).map(|_| ())
                })
            })
        };

        let reminders_task = {
            let store = store.clone();
            let logs = logs.clone();
            spawn_periodic("order_reminders", config.reminders_every, move || {
                let store = store.clone();
                let logs = logs.clone();
                blocking(bound, move || {
                    reminders::run_order_reminders_job(store.as_ref(), &logs.reminders)
                        .map(|_| ())
                })
            })
        };

        let report_task = {
            let store = store.clone();
            let logs = logs.clone();
            spawn_periodic("crm_report", config.report_every, move || {
                let store = store.clone();
                let logs = logs.clone();
                blocking(bound, move || {
                    report::run_report_job(store.as_ref(), &logs.report).map(|_| ())
                })
            })
        };

        info!("job scheduler started");
        Self {
            tasks: vec![heartbeat_task, replenish_task, reminders_task, report_task],
        }
    }

    /// Stop all scheduled jobs.
    pub fn shutdown(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

/// Run a sync job on the blocking pool under a timeout.
async fn blocking<F>(bound: Duration, job: F) -> Result<(), JobError>
where
    F: FnOnce() -> Result<(), JobError> + Send + 'static,
{
    match timeout(bound, tokio::task::spawn_blocking(job)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(JobError::Log(std::io::Error::other(join_err))),
        Err(_) => Err(JobError::Timeout(bound)),
    }
}

fn spawn_periodic<F, Fut>(name: &'static str, every: Duration, run: F) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), JobError>> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of a tokio interval completes immediately; consume
        // it so the first run lands one period after spawn.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(err) = run().await {
                error!(job = name, error = %err, "scheduled job failed");
            }
        }
    })
}
