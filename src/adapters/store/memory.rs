//! In-process record store
//!
//! Keeps customers and sync logs in memory behind a mutex. Transactions buffer
//! their writes and apply them atomically on commit. The store can be switched
//! to "unavailable" and can fail a number of transactional writes, which makes
//! it the test double for the sync engine as well as the `memory` backend.

use crate::adapters::store::traits::{RecordStore, StoreTransaction};
use crate::domain::{
    CustomerRecord, LogEntryId, NewCustomer, RecordId, Result, StoreError, SyncLogEntry,
    SyncStatus,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    customers: Vec<CustomerRecord>,
    logs: Vec<SyncLogEntry>,
    next_customer_id: i64,
    next_log_id: i64,
}

impl MemoryState {
    fn push_log(&mut self, record_id: RecordId, payload: &str, status: SyncStatus) -> LogEntryId {
        self.next_log_id += 1;
        let id = LogEntryId::new(self.next_log_id);
        self.logs.push(SyncLogEntry {
            id,
            record_id: Some(record_id),
            payload: payload.to_string(),
            status,
            created_at: Utc::now(),
        });
        id
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: Mutex<MemoryState>,
    unavailable: AtomicBool,
    pending_write_failures: AtomicUsize,
    begins: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // poisoned by a panicking test thread; the state itself is still usable
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is marked unavailable".to_string()).into());
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        self.check_available()?;
        if self.take_write_failure() {
            return Err(StoreError::QueryFailed("injected write failure".to_string()).into());
        }
        Ok(())
    }

    fn take_write_failure(&self) -> bool {
        self.pending_write_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Counters of transaction lifecycle calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionStats {
    /// Transactions opened
    pub begins: usize,
    /// Transactions committed
    pub commits: usize,
    /// Transactions rolled back
    pub rollbacks: usize,
}

/// In-memory [`RecordStore`]
///
/// Cloning yields another handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given customers
    pub fn with_customers(customers: impl IntoIterator<Item = NewCustomer>) -> Self {
        let store = Self::new();
        {
            let mut state = store.inner.lock();
            for customer in customers {
                insert_locked(&mut state, &customer);
            }
        }
        store
    }

    /// Make every subsequent operation fail with `StoreError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Fail the next `count` log or flag writes with `StoreError::QueryFailed`
    ///
    /// Covers writes inside a transaction and standalone [`RecordStore::append_log`].
    pub fn fail_next_writes(&self, count: usize) {
        self.inner
            .pending_write_failures
            .store(count, Ordering::SeqCst);
    }

    /// Snapshot of every customer row
    pub fn customers(&self) -> Vec<CustomerRecord> {
        self.inner.lock().customers.clone()
    }

    /// Snapshot of a single customer row
    pub fn customer(&self, id: RecordId) -> Option<CustomerRecord> {
        self.inner
            .lock()
            .customers
            .iter()
            .find(|c| c.internal_id == id)
            .cloned()
    }

    /// Snapshot of every log entry in insertion order
    pub fn logs(&self) -> Vec<SyncLogEntry> {
        self.inner.lock().logs.clone()
    }

    /// Log entries written for one record, in insertion order
    pub fn logs_for(&self, id: RecordId) -> Vec<SyncLogEntry> {
        self.inner
            .lock()
            .logs
            .iter()
            .filter(|l| l.record_id == Some(id))
            .cloned()
            .collect()
    }

    /// Transaction lifecycle counters
    pub fn transaction_stats(&self) -> TransactionStats {
        TransactionStats {
            begins: self.inner.begins.load(Ordering::SeqCst),
            commits: self.inner.commits.load(Ordering::SeqCst),
            rollbacks: self.inner.rollbacks.load(Ordering::SeqCst),
        }
    }
}

fn insert_locked(state: &mut MemoryState, customer: &NewCustomer) -> RecordId {
    state.next_customer_id += 1;
    let id = RecordId::new(state.next_customer_id);
    state.customers.push(CustomerRecord::new(
        id,
        customer.external_customer_id,
        customer.name.clone(),
        customer.phone.clone(),
    ));
    id
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        self.inner.check_available()
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.inner.check_available()
    }

    async fn count_customers(&self) -> Result<u64> {
        self.inner.check_available()?;
        Ok(self.inner.lock().customers.len() as u64)
    }

    async fn insert_customer(&self, customer: &NewCustomer) -> Result<RecordId> {
        self.inner.check_available()?;
        Ok(insert_locked(&mut self.inner.lock(), customer))
    }

    async fn fetch_unsynced(&self) -> Result<Vec<CustomerRecord>> {
        self.inner.check_available()?;
        Ok(self
            .inner
            .lock()
            .customers
            .iter()
            .filter(|c| !c.synced)
            .cloned()
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>> {
        self.inner.check_available()?;
        self.inner.begins.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryTransaction {
            inner: self.inner.clone(),
            writes: Vec::new(),
        }))
    }

    async fn append_log(
        &self,
        record_id: RecordId,
        payload: &str,
        status: SyncStatus,
    ) -> Result<LogEntryId> {
        self.inner.check_write()?;
        Ok(self.inner.lock().push_log(record_id, payload, status))
    }

    async fn list_logs(&self) -> Result<Vec<SyncLogEntry>> {
        self.inner.check_available()?;
        let mut logs = self.inner.lock().logs.clone();
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(logs)
    }
}

#[derive(Debug)]
enum PendingWrite {
    Log {
        record_id: RecordId,
        payload: String,
        status: SyncStatus,
    },
    MarkSynced(RecordId),
}

/// Buffered transaction over a [`MemoryStore`]
struct MemoryTransaction {
    inner: Arc<Inner>,
    writes: Vec<PendingWrite>,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn insert_log(
        &mut self,
        record_id: RecordId,
        payload: &str,
        status: SyncStatus,
    ) -> Result<LogEntryId> {
        self.inner.check_write()?;
        self.writes.push(PendingWrite::Log {
            record_id,
            payload: payload.to_string(),
            status,
        });
        // The real id is assigned on commit; report the id it will most likely get
        let state = self.inner.lock();
        Ok(LogEntryId::new(state.next_log_id + 1))
    }

    async fn mark_synced(&mut self, record_id: RecordId) -> Result<()> {
        self.inner.check_write()?;
        let exists = self
            .inner
            .lock()
            .customers
            .iter()
            .any(|c| c.internal_id == record_id);
        if !exists {
            return Err(StoreError::QueryFailed(format!("customer {record_id} not found")).into());
        }
        self.writes.push(PendingWrite::MarkSynced(record_id));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.inner.check_available()?;
        let mut state = self.inner.lock();
        for write in &self.writes {
            match write {
                PendingWrite::Log {
                    record_id,
                    payload,
                    status,
                } => {
                    state.push_log(*record_id, payload, *status);
                }
                PendingWrite::MarkSynced(id) => {
                    if let Some(customer) =
                        state.customers.iter_mut().find(|c| c.internal_id == *id)
                    {
                        customer.synced = true;
                    }
                }
            }
        }
        drop(state);
        self.inner.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.inner.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
