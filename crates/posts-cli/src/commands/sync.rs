use posts_core::services::PostService;
use posts_core::sync::SyncMode;

use crate::commands::common::report_status;
use crate::error::CliError;

pub async fn run_sync(service: &PostService, mode: SyncMode) -> Result<(), CliError> {
    let status = service.sync(mode).await;
    tracing::info!(%mode, code = status.code, "Sync finished");
    report_status(status)
}
