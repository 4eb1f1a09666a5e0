//! Retry-protected transactional commit of a single record
//!
//! Each attempt runs in its own transaction:
//!
//! 1. push the payload to the CRM
//! 2. insert a `SUCCESS` log entry
//! 3. set `synced = true`
//! 4. commit
//!
//! Any failure rolls the attempt back. After the last failed attempt a
//! standalone `FAILED` entry is appended and the record stays unsynced.

use crate::adapters::crm::CrmClient;
use crate::adapters::store::{RecordStore, StoreTransaction};
use crate::config::SyncConfig;
use crate::domain::{RecordId, Result, SyncPayload, SyncStatus};
use crate::{log_retry_attempt, log_sync_attempt};
use std::sync::Arc;
use std::time::Duration;

/// Fixed-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per record
    pub max_attempts: u32,
    /// Delay between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create a policy
    ///
    /// `max_attempts` must be at least one; `[sync] max_retries` is validated
    /// when the configuration loads.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        debug_assert!(max_attempts >= 1, "retry policy needs at least one attempt");
        Self {
            max_attempts,
            delay,
        }
    }

    /// Policy from the `[sync]` section
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

/// Terminal outcome of committing one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The record was pushed, logged as `SUCCESS` and flagged as synced
    Committed {
        /// Attempt that succeeded
        attempts: u32,
    },
    /// Every attempt failed; a `FAILED` entry was logged
    Exhausted {
        /// Attempts made
        attempts: u32,
    },
}

impl CommitOutcome {
    /// Attempts made before reaching this outcome
    pub fn attempts(&self) -> u32 {
        match self {
            CommitOutcome::Committed { attempts } | CommitOutcome::Exhausted { attempts } => {
                *attempts
            }
        }
    }
}

/// Commits records to the CRM and the store with bounded retries
pub struct Committer {
    store: Arc<dyn RecordStore>,
    crm: Arc<dyn CrmClient>,
    policy: RetryPolicy,
}

impl Committer {
    /// Create a new committer
    pub fn new(store: Arc<dyn RecordStore>, crm: Arc<dyn CrmClient>, policy: RetryPolicy) -> Self {
        Self { store, crm, policy }
    }

    /// Commit one record
    ///
    /// CRM rejections and statement failures inside an attempt are retried.
    /// They never surface as an error.
    ///
    /// # Errors
    ///
    /// Returns the store error if the store becomes unavailable, or if the
    /// `FAILED` entry can't be written after the last attempt. Writes of the
    /// current attempt are rolled back and the record stays unsynced.
    pub async fn commit(&self, payload: &SyncPayload, record_id: RecordId) -> Result<CommitOutcome> {
        let payload_json = payload.to_json()?;
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            log_sync_attempt!(record_id, attempt, max_attempts);

            match self.attempt(payload, &payload_json, record_id).await {
                Ok(()) => {
                    tracing::info!(record_id = %record_id, attempt, "Record synced");
                    return Ok(CommitOutcome::Committed { attempts: attempt });
                }
                Err(e) if e.is_store_unavailable() => {
                    tracing::error!(record_id = %record_id, attempt, error = %e, "Record store unavailable");
                    return Err(e);
                }
                Err(e) if attempt < max_attempts => {
                    log_retry_attempt!(attempt, max_attempts, e);
                    tokio::time::sleep(self.policy.delay).await;
                }
                Err(e) => {
                    tracing::warn!(
                        record_id = %record_id,
                        attempt,
                        error = %e,
                        "Final attempt failed"
                    );
                }
            }
        }

        self.record_exhaustion(record_id, &payload_json).await?;
        Ok(CommitOutcome::Exhausted {
            attempts: max_attempts,
        })
    }

    async fn attempt(&self, payload: &SyncPayload, payload_json: &str, record_id: RecordId) -> Result<()> {
        let mut tx = self.store.begin().await?;

        match self.apply(tx.as_mut(), payload, payload_json, record_id).await {
            Ok(()) => tx.commit().await,
            Err(e) => {
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::warn!(
                        record_id = %record_id,
                        error = %rollback_error,
                        "Rollback failed"
                    );
                }
                Err(e)
            }
        }
    }

    async fn apply(
        &self,
        tx: &mut dyn StoreTransaction,
        payload: &SyncPayload,
        payload_json: &str,
        record_id: RecordId,
    ) -> Result<()> {
        self.crm.push(payload).await?;
        tx.insert_log(record_id, payload_json, SyncStatus::Success)
            .await?;
        tx.mark_synced(record_id).await
    }

    async fn record_exhaustion(&self, record_id: RecordId, payload_json: &str) -> Result<()> {
        tracing::error!(
            record_id = %record_id,
            attempts = self.policy.max_attempts,
            "Record failed after all attempts"
        );

        self.store
            .append_log(record_id, payload_json, SyncStatus::Failed)
            .await
            .map_err(|e| {
                tracing::error!(record_id = %record_id, error = %e, "Failed to write FAILED log entry");
                e
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::crm::ScriptedCrm;
    use crate::adapters::store::MemoryStore;
    use crate::domain::{ErpSyncError, NewCustomer, StoreError};

    fn payload() -> SyncPayload {
        SyncPayload {
            customer_id: Some(1),
            name: Some("Rahul".to_string()),
            phone: Some("9876543210".to_string()),
        }
    }

    fn setup(crm: ScriptedCrm) -> (MemoryStore, Arc<ScriptedCrm>, Committer) {
        let store = MemoryStore::with_customers([NewCustomer::new(1, "Rahul", "9876543210")]);
        let crm = Arc::new(crm);
        let committer = Committer::new(
            Arc::new(store.clone()),
            crm.clone(),
            RetryPolicy::new(3, Duration::from_millis(500)),
        );
        (store, crm, committer)
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_first_attempt() {
        let (store, crm, committer) = setup(ScriptedCrm::always_succeed());
        let id = RecordId::new(1);

        let outcome = committer.commit(&payload(), id).await.unwrap();

        assert_eq!(outcome, CommitOutcome::Committed { attempts: 1 });
        assert_eq!(crm.calls(), 1);
        assert!(store.customer(id).unwrap().synced);
        let logs = store.logs_for(id);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, SyncStatus::Success);
        assert_eq!(
            logs[0].payload,
            r#"{"customerId":1,"name":"Rahul","phone":"9876543210"}"#
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_after_retry() {
        let (store, crm, committer) = setup(ScriptedCrm::from_outcomes([false, true], false));
        let id = RecordId::new(1);

        let outcome = committer.commit(&payload(), id).await.unwrap();

        assert_eq!(outcome, CommitOutcome::Committed { attempts: 2 });
        assert_eq!(crm.calls(), 2);
        assert_eq!(store.logs_for(id).len(), 1);
        assert_eq!(store.transaction_stats().rollbacks, 1);
        assert_eq!(store.transaction_stats().commits, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_logs_failure_once() {
        let (store, crm, committer) = setup(ScriptedCrm::always_fail());
        let id = RecordId::new(1);

        let start = tokio::time::Instant::now();
        let outcome = committer.commit(&payload(), id).await.unwrap();

        assert_eq!(outcome, CommitOutcome::Exhausted { attempts: 3 });
        assert_eq!(crm.calls(), 3);
        assert!(!store.customer(id).unwrap().synced);
        let logs = store.logs_for(id);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, SyncStatus::Failed);
        assert_eq!(store.transaction_stats().rollbacks, 3);
        // two delays between three attempts
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000), "elapsed = {elapsed:?}");
        assert!(elapsed < Duration::from_millis(1500), "elapsed = {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_write_failure_is_retried() {
        let (store, crm, committer) = setup(ScriptedCrm::always_succeed());
        store.fail_next_writes(1);
        let id = RecordId::new(1);

        let outcome = committer.commit(&payload(), id).await.unwrap();

        assert_eq!(outcome, CommitOutcome::Committed { attempts: 2 });
        assert_eq!(crm.calls(), 2);
        assert_eq!(store.logs_for(id).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unwritable_failed_entry_is_an_error() {
        let (store, crm, committer) = setup(ScriptedCrm::always_fail());
        store.fail_next_writes(1);
        let id = RecordId::new(1);

        let err = committer.commit(&payload(), id).await.unwrap_err();

        assert!(matches!(err, ErpSyncError::Store(StoreError::QueryFailed(_))));
        assert_eq!(crm.calls(), 3);
        assert!(store.logs_for(id).is_empty());
        assert!(!store.customer(id).unwrap().synced);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_store_aborts() {
        let (store, crm, committer) = setup(ScriptedCrm::always_succeed());
        store.set_unavailable(true);

        let err = committer
            .commit(&payload(), RecordId::new(1))
            .await
            .unwrap_err();

        assert!(err.is_store_unavailable());
        assert_eq!(crm.calls(), 0);
        store.set_unavailable(false);
        assert!(store.logs().is_empty());
    }

    #[test]
    #[should_panic(expected = "at least one attempt")]
    fn test_retry_policy_rejects_zero_attempts() {
        RetryPolicy::new(0, Duration::ZERO);
    }

    #[test]
    fn test_retry_policy_from_config() {
        let policy = RetryPolicy::from_config(&SyncConfig::default());
        assert_eq!(policy, RetryPolicy::default());
    }
}
