//! Sync engine - main orchestrator for a sync run
//!
//! A run fetches every unsynced record, splits them into batches and commits
//! each record in order. Only one run executes at a time per engine.

use crate::adapters::crm::CrmClient;
use crate::adapters::store::RecordStore;
use crate::config::SyncConfig;
use crate::core::sync::batch::chunk;
use crate::core::sync::committer::{CommitOutcome, Committer, RetryPolicy};
use crate::core::sync::reader::fetch_unsynced;
use crate::core::sync::summary::SyncSummary;
use crate::core::sync::transform::transform;
use crate::domain::{ErpSyncError, Result};
use crate::log_batch_processing;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

/// Sync engine
pub struct SyncEngine {
    store: Arc<dyn RecordStore>,
    committer: Committer,
    batch_size: usize,
    run_lock: Mutex<()>,
}

impl SyncEngine {
    /// Create a sync engine from the `[sync]` configuration section
    ///
    /// # Errors
    ///
    /// Returns [`ErpSyncError::InvalidBatchSize`] if `batch_size` is zero.
    pub fn new(
        store: Arc<dyn RecordStore>,
        crm: Arc<dyn CrmClient>,
        config: &SyncConfig,
    ) -> Result<Self> {
        Self::with_policy(store, crm, config.batch_size, RetryPolicy::from_config(config))
    }

    /// Create a sync engine with an explicit batch size and retry policy
    ///
    /// # Errors
    ///
    /// Returns [`ErpSyncError::InvalidBatchSize`] if `batch_size` is zero.
    pub fn with_policy(
        store: Arc<dyn RecordStore>,
        crm: Arc<dyn CrmClient>,
        batch_size: usize,
        policy: RetryPolicy,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(ErpSyncError::InvalidBatchSize(batch_size));
        }

        tracing::debug!(
            backend = store.backend_name(),
            crm = crm.name(),
            batch_size,
            max_attempts = policy.max_attempts,
            retry_delay_ms = policy.delay.as_millis() as u64,
            "Sync engine created"
        );

        Ok(Self {
            committer: Committer::new(store.clone(), crm, policy),
            store,
            batch_size,
            run_lock: Mutex::new(()),
        })
    }

    /// Record store the engine reads from and writes to
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Whether a run currently holds the run lock
    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }

    /// Execute one sync run
    ///
    /// # Errors
    ///
    /// Returns [`ErpSyncError::SyncInProgress`] if another run is executing,
    /// or the store error if the store is unavailable. Records committed or
    /// logged before the failure keep their state.
    pub async fn run_sync(&self) -> Result<SyncSummary> {
        let _guard = self
            .run_lock
            .try_lock()
            .map_err(|_| ErpSyncError::SyncInProgress)?;

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("sync_run", run_id = %run_id);
        self.execute(run_id).instrument(span).await
    }

    async fn execute(&self, run_id: Uuid) -> Result<SyncSummary> {
        let start_time = Instant::now();
        tracing::info!("Starting sync run");

        let records = fetch_unsynced(self.store.as_ref()).await?;
        let mut summary = SyncSummary::new(run_id);

        if records.is_empty() {
            tracing::info!("No unsynced records");
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        let batches = chunk(&records, self.batch_size)?;
        summary.batches = batches.len();

        tracing::info!(
            records = records.len(),
            batches = batches.len(),
            batch_size = self.batch_size,
            "Processing unsynced records"
        );

        for (index, batch) in batches.iter().enumerate() {
            log_batch_processing!(index + 1, batches.len(), batch.len());

            for record in batch {
                let payload = transform(record);
                let outcome = self.committer.commit(&payload, record.internal_id).await?;
                tracing::debug!(
                    record_id = %record.internal_id,
                    attempts = outcome.attempts(),
                    "Record processed"
                );
                match outcome {
                    CommitOutcome::Committed { .. } => summary.record_success(),
                    CommitOutcome::Exhausted { .. } => summary.record_failure(),
                }
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::crm::ScriptedCrm;
    use crate::adapters::store::MemoryStore;
    use crate::domain::seed_customers;
    use std::time::Duration;

    fn engine(store: &MemoryStore, crm: ScriptedCrm, batch_size: usize) -> Result<SyncEngine> {
        SyncEngine::with_policy(
            Arc::new(store.clone()),
            Arc::new(crm),
            batch_size,
            RetryPolicy::new(3, Duration::from_millis(500)),
        )
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let store = MemoryStore::new();
        let result = engine(&store, ScriptedCrm::always_succeed(), 0);
        assert!(matches!(result, Err(ErpSyncError::InvalidBatchSize(0))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_reports_batches() {
        let store = MemoryStore::with_customers(seed_customers());
        let engine = engine(&store, ScriptedCrm::always_succeed(), 1).unwrap();

        let summary = engine.run_sync().await.unwrap();

        assert_eq!(summary.batches, 2);
        assert_eq!(summary.processed, 2);
        assert!(!engine.is_running());
    }

    #[tokio::test]
    async fn test_empty_run() {
        let store = MemoryStore::new();
        let engine = engine(&store, ScriptedCrm::always_succeed(), 2).unwrap();

        let summary = engine.run_sync().await.unwrap();

        assert_eq!(summary.processed, 0);
        assert_eq!(summary.batches, 0);
        assert_eq!(store.transaction_stats().begins, 0);
    }
}
