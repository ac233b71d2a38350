//! Liveness heartbeat.
//!
//! Appends one `CRM is alive` line per run, annotated with whether the API
//! endpoint answered a probe. Reachability is an explicit value, not a
//! caught-and-ignored fault: an unreachable endpoint is still a successful
//! heartbeat run.

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::job_log::{JobLog, STAMP_DMY};
use crate::JobError;

/// Outcome of probing the API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Responsive,
    Unreachable,
}

/// Probe the endpoint with a short GET. Any HTTP answer counts as
/// responsive; transport errors and non-success statuses do not.
pub async fn probe_endpoint(client: &reqwest::Client, url: &str) -> Reachability {
    match client.get(url).timeout(Duration::from_secs(5)).send().await {
        Ok(resp) if resp.status().is_success() => Reachability::Responsive,
        Ok(resp) => {
            debug!(status = %resp.status(), "heartbeat probe got non-success status");
            Reachability::Unreachable
        }
        Err(err) => {
            debug!(error = %err, "heartbeat probe failed");
            Reachability::Unreachable
        }
    }
}

/// Render the heartbeat line.
pub fn heartbeat_entry(run_at: DateTime<Local>, reachability: Reachability) -> String {
    let suffix = match reachability {
        Reachability::Responsive => "API endpoint responsive",
        Reachability::Unreachable => "API endpoint unreachable",
    };
    format!("{} CRM is alive | {}\n", run_at.format(STAMP_DMY), suffix)
}

/// One scheduled run: probe, then append the heartbeat line.
pub async fn run_heartbeat_job(
    client: &reqwest::Client,
    health_url: &str,
    log: &JobLog,
) -> Result<Reachability, JobError> {
    let reachability = probe_endpoint(client, health_url).await;
    log.append(&heartbeat_entry(Local::now(), reachability))?;
    Ok(reachability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn entry_carries_reachability() {
        let run_at = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            heartbeat_entry(run_at, Reachability::Responsive),
            "02/01/2026-03:04:05 CRM is alive | API endpoint responsive\n"
        );
        assert_eq!(
            heartbeat_entry(run_at, Reachability::Unreachable),
            "02/01/2026-03:04:05 CRM is alive | API endpoint unreachable\n"
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_still_logs_a_heartbeat() {
        let dir = tempfile::tempdir().unwrap();
        let log = JobLog::open(dir.path().join("heartbeat.txt")).unwrap();
        let client = reqwest::Client::new();

        // Nothing listens on this port.
        let reach = run_heartbeat_job(&client, "http://127.0.0.1:1/health", &log)
            .await
            .unwrap();

        assert_eq!(reach, Reachability::Unreachable);
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.contains("CRM is alive | API endpoint unreachable"));
    }
}
