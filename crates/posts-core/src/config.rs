//! Runtime configuration read from environment variables.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::remote::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT};
use crate::sync::SyncMode;
use crate::util::is_http_url;

/// Default reference time of the first scheduled sync.
pub const DEFAULT_SYNC_START: &str = "2020-10-01 00:00:00";

const DEFAULT_SYNC_PERIOD_SECS: &str = "86400";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Remote collection endpoint
    pub source_url: String,
    /// Local database file; callers choose a default when unset
    pub db_path: Option<PathBuf>,
    pub http_timeout: Duration,
    /// Raw reference time, validated by the scheduler so a bad value only
    /// disables scheduling
    pub sync_start: String,
    pub sync_period: Duration,
    pub sync_mode: SyncMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            db_path: None,
            http_timeout: DEFAULT_TIMEOUT,
            sync_start: DEFAULT_SYNC_START.to_string(),
            sync_period: Duration::from_secs(86_400),
            sync_mode: SyncMode::Populate,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source_url = value_or_default(&lookup, "POSTS_SOURCE_URL", DEFAULT_SOURCE_URL);
        if !is_http_url(&source_url) {
            return Err(ConfigError::Invalid(
                "POSTS_SOURCE_URL must start with http:// or https://".to_string(),
            ));
        }

        let db_path = optional_trimmed(&lookup, "POSTS_DB_PATH").map(PathBuf::from);

        let http_timeout = match optional_trimmed(&lookup, "POSTS_HTTP_TIMEOUT_MS") {
            None => DEFAULT_TIMEOUT,
            Some(raw) => {
                let millis = raw.parse::<u64>().map_err(|_| {
                    ConfigError::Invalid(
                        "POSTS_HTTP_TIMEOUT_MS must be an integer in [100, 60000]".to_string(),
                    )
                })?;
                if !(100..=60_000).contains(&millis) {
                    return Err(ConfigError::Invalid(
                        "POSTS_HTTP_TIMEOUT_MS must be in [100, 60000]".to_string(),
                    ));
                }
                Duration::from_millis(millis)
            }
        };

        let sync_start = value_or_default(&lookup, "POSTS_SYNC_START", DEFAULT_SYNC_START);

        let sync_period_secs =
            value_or_default(&lookup, "POSTS_SYNC_PERIOD_SECS", DEFAULT_SYNC_PERIOD_SECS)
                .parse::<u64>()
                .map_err(|_| {
                    ConfigError::Invalid(
                        "POSTS_SYNC_PERIOD_SECS must be an integer in [60, 604800]".to_string(),
                    )
                })?;
        if !(60..=604_800).contains(&sync_period_secs) {
            return Err(ConfigError::Invalid(
                "POSTS_SYNC_PERIOD_SECS must be in [60, 604800]".to_string(),
            ));
        }

        let sync_mode = value_or_default(&lookup, "POSTS_SYNC_MODE", "populate")
            .parse::<SyncMode>()
            .map_err(|error| ConfigError::Invalid(format!("POSTS_SYNC_MODE: {error}")))?;

        Ok(Self {
            source_url,
            db_path,
            http_timeout,
            sync_start,
            sync_period: Duration::from_secs(sync_period_secs),
            sync_mode,
        })
    }
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
