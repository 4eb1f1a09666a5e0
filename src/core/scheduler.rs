//! Periodic sync trigger
//!
//! Runs [`SyncEngine::run_sync`] on a fixed interval until shut down. Failed
//! runs are logged and never stop the schedule.

use crate::core::sync::SyncEngine;
use crate::domain::{ErpSyncError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Periodic sync scheduler
pub struct SyncScheduler {
    engine: Arc<SyncEngine>,
    interval: Duration,
}

impl SyncScheduler {
    /// Create a scheduler firing every `interval`
    pub fn new(engine: Arc<SyncEngine>, interval: Duration) -> Self {
        Self { engine, interval }
    }

    /// Spawn the schedule loop
    ///
    /// The first run fires one interval after start. A run that is still
    /// executing when a tick is due makes that tick skip.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tracing::info!(
            interval_seconds = self.interval.as_secs(),
            "Starting sync scheduler"
        );
        let task = tokio::spawn(self.run(shutdown_rx));

        SchedulerHandle { shutdown_tx, task }
    }

    async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut interval = time::interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => self.tick().await,
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Sync scheduler stopped");
    }

    async fn tick(&self) {
        tracing::debug!("Scheduled sync triggered");

        match self.engine.run_sync().await {
            Ok(summary) => tracing::debug!(
                run_id = %summary.run_id,
                processed = summary.processed,
                "Scheduled sync finished"
            ),
            Err(ErpSyncError::SyncInProgress) => {
                tracing::info!("Previous sync still running, skipping scheduled run")
            }
            Err(e) => tracing::error!(error = %e, "Scheduled sync failed"),
        }
    }
}

/// Handle to a running scheduler
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop scheduling and wait for an in-flight run to finish
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler task panicked.
    pub async fn shutdown(self) -> Result<()> {
        tracing::info!("Shutting down sync scheduler");
        let _ = self.shutdown_tx.send(true);
        self.task
            .await
            .map_err(|e| ErpSyncError::Other(format!("Sync scheduler task failed: {e}")))
    }

    /// Whether the schedule loop has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
