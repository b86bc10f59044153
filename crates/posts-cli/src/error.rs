use std::io;

use posts_core::config::ConfigError;
use posts_core::Status;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] posts_core::Error),
    #[error(transparent)]
    Env(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Operation failed: {0}")]
    Failed(Status),
    #[error("Scheduler was not started: {0}")]
    SchedulerDisabled(String),
}
