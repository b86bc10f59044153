use posts_core::config::AppConfig;
use posts_core::services::PostService;
use posts_core::sync::{SyncMode, SyncScheduler};

use crate::error::CliError;

/// Run the recurring sync in the foreground until Ctrl-C.
pub async fn run_schedule(
    service: PostService,
    config: &AppConfig,
    mode: SyncMode,
) -> Result<(), CliError> {
    let scheduler = SyncScheduler::start(&config.sync_start, config.sync_period, move || {
        let service = service.clone();
        async move { service.sync(mode).await }
    })
    .ok_or_else(|| {
        CliError::SchedulerDisabled(format!(
            "start time '{}' or period {:?} is not usable",
            config.sync_start, config.sync_period
        ))
    })?;

    println!("Scheduled {mode} sync from {}; press Ctrl-C to stop", config.sync_start);
    tokio::signal::ctrl_c().await?;

    tracing::info!("Stopping scheduler");
    scheduler.shutdown().await;
    Ok(())
}
