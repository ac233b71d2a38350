use std::sync::Arc;

use anvilcrm_api::app;
use anvilcrm_api::config::ApiConfig;
use anvilcrm_jobs::{JobLogs, Scheduler, SchedulerConfig};
use anvilcrm_store::InMemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    anvilcrm_observability::init();

    let config = ApiConfig::from_env();

    let store: Arc<dyn anvilcrm_store::CrmStore> = InMemoryStore::arc();
    let logs = Arc::new(JobLogs::open(&config.log_dir)?);

    // The heartbeat probes our own health endpoint over loopback.
    let probe_host = config.bind.replace("0.0.0.0", "127.0.0.1");
    let scheduler_config = SchedulerConfig {
        health_url: format!("http://{probe_host}/health"),
        ..SchedulerConfig::default()
    };
    let _scheduler = Scheduler::spawn(store.clone(), logs.clone(), scheduler_config);

    let state = Arc::new(app::AppState { store, logs });
    let router = app::build_app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
