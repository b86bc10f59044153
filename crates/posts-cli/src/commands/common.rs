use std::path::{Path, PathBuf};
use std::sync::Arc;

use posts_core::config::AppConfig;
use posts_core::remote::RemoteClient;
use posts_core::services::PostService;
use posts_core::Status;
use serde::Serialize;

use crate::error::CliError;

/// Flag first, then `POSTS_DB_PATH`, then the platform data directory.
pub fn resolve_db_path(cli_db_path: Option<PathBuf>, env_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path.or(env_db_path).unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("posts")
        .join("posts.db")
}

pub fn open_service(config: &AppConfig, db_path: &Path) -> Result<PostService, CliError> {
    let client = RemoteClient::new(config.source_url.clone(), config.http_timeout)?;
    tracing::debug!(db_path = %db_path.display(), endpoint = client.endpoint(), "Opening post service");
    Ok(PostService::open_path(db_path, Arc::new(client))?)
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Turn a non-success status into an error so the process exits non-zero.
pub fn ensure_success(status: Status) -> Result<(), CliError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(CliError::Failed(status))
    }
}

/// Print `status` as JSON and fail when it is not a success.
pub fn report_status(status: Status) -> Result<(), CliError> {
    println!("{}", to_pretty_json(&status)?);
    ensure_success(status)
}
