//! Record store abstraction traits
//!
//! This module defines the traits that record store backends must implement
//! to be driven by the sync engine.

use crate::domain::{
    CustomerRecord, LogEntryId, NewCustomer, RecordId, Result, SyncLogEntry, SyncStatus,
};
use async_trait::async_trait;

/// Gateway to the ERP customer table and the sync log table
///
/// Errors are reported as [`StoreError`](crate::domain::StoreError) wrapped in
/// [`ErpSyncError::Store`](crate::domain::ErpSyncError::Store). Backends must
/// report an unreachable store as `StoreError::Unavailable` so the engine can
/// abort the run instead of retrying the record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Cheap reachability probe (`SELECT 1`)
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store can't be reached.
    async fn ping(&self) -> Result<()>;

    /// Create the customer and sync log tables if they don't exist
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    async fn ensure_schema(&self) -> Result<()>;

    /// Number of rows in the customer table
    async fn count_customers(&self) -> Result<u64>;

    /// Insert a customer row (unsynced)
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<RecordId>;

    /// All customers with `synced = false`, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store can't be reached.
    async fn fetch_unsynced(&self) -> Result<Vec<CustomerRecord>>;

    /// Open a transaction on a dedicated connection
    ///
    /// The connection is held by the returned handle until it is committed,
    /// rolled back, or dropped.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>>;

    /// Append a log entry outside of any transaction
    async fn append_log(
        &self,
        record_id: RecordId,
        payload: &str,
        status: SyncStatus,
    ) -> Result<LogEntryId>;

    /// All log entries, newest first
    async fn list_logs(&self) -> Result<Vec<SyncLogEntry>>;
}

/// A single open transaction
///
/// Writes made through the handle become visible only after [`commit`].
/// Dropping the handle without committing discards them.
///
/// [`commit`]: StoreTransaction::commit
#[async_trait]
pub trait StoreTransaction: Send {
    /// Append a log entry inside the transaction
    async fn insert_log(
        &mut self,
        record_id: RecordId,
        payload: &str,
        status: SyncStatus,
    ) -> Result<LogEntryId>;

    /// Set `synced = true` on a customer row
    ///
    /// # Errors
    ///
    /// Returns `StoreError::QueryFailed` if the row doesn't exist.
    async fn mark_synced(&mut self, record_id: RecordId) -> Result<()>;

    /// Commit every write made through this handle and release the connection
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Discard every write made through this handle and release the connection
    async fn rollback(self: Box<Self>) -> Result<()>;
}
