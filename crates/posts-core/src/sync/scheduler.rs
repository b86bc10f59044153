//! Recurring sync trigger
//!
//! Fires once at a reference wall-clock time and then every `period`. A
//! reference time already in the past fires right away.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{Error, Result};
use crate::status::Status;

/// Format of the reference time, e.g. `2020-10-01 00:00:00` (local time).
pub const FIRST_RUN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a reference time in [`FIRST_RUN_FORMAT`] as local time.
pub fn parse_first_run(value: &str) -> Result<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), FIRST_RUN_FORMAT)
        .map_err(|error| Error::Config(format!("invalid sync start time '{value}': {error}")))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| Error::Config(format!("sync start time '{value}' does not exist locally")))
}

/// Background task running a sync job on a fixed schedule
pub struct SyncScheduler {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SyncScheduler {
    /// Spawn the schedule on the current tokio runtime.
    ///
    /// Returns `None` (after logging) when `first_run` can't be parsed or
    /// `period` is zero; in that case the job never fires.
    pub fn start<F, Fut>(first_run: &str, period: Duration, job: F) -> Option<Self>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Status> + Send,
    {
        let first_run = match parse_first_run(first_run) {
            Ok(first_run) => first_run,
            Err(error) => {
                tracing::info!("{error}");
                return None;
            }
        };
        if period.is_zero() {
            tracing::warn!("Sync period must be greater than zero; scheduler disabled");
            return None;
        }

        let delay = initial_delay(first_run, Local::now());
        tracing::info!(
            first_run = %first_run,
            delay_secs = delay.as_secs(),
            period_secs = period.as_secs(),
            "Scheduled recurring sync"
        );
        Some(Self::spawn(delay, period, job))
    }

    fn spawn<F, Fut>(delay: Duration, period: Duration, job: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Status> + Send,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + delay, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    // Fires on shutdown() and when the scheduler is dropped
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        let status = job().await;
                        if status.is_success() {
                            tracing::info!("Scheduled sync finished: {status}");
                        } else {
                            tracing::warn!("Scheduled sync finished: {status}");
                        }
                    }
                }
            }
            tracing::debug!("Sync scheduler stopped");
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stop future firings and wait for an in-flight run to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(error) = self.handle.await {
            tracing::warn!("Sync scheduler task ended abnormally: {error}");
        }
    }
}

/// Time left until `first_run`, or zero when it has already passed.
fn initial_delay(first_run: DateTime<Local>, now: DateTime<Local>) -> Duration {
    (first_run - now).to_std().unwrap_or(Duration::ZERO)
}
