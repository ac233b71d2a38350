//! Process configuration, read once from the environment in `main`.

use std::path::PathBuf;

/// Environment-derived API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address, `CRM_BIND` (default `0.0.0.0:8080`).
    pub bind: String,
    /// Directory holding the job log files, `CRM_LOG_DIR` (default `/tmp`).
    pub log_dir: PathBuf,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let bind = std::env::var("CRM_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_dir = std::env::var("CRM_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"));
        Self { bind, log_dir }
    }
}
