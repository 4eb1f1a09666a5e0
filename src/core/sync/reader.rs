//! Unsynced record selection

use crate::adapters::store::RecordStore;
use crate::domain::{CustomerRecord, Result};

/// Fetch every record still waiting to be synced, in insertion order
///
/// Store errors are returned as-is; there is no retry at this level.
pub async fn fetch_unsynced(store: &dyn RecordStore) -> Result<Vec<CustomerRecord>> {
    let records = store.fetch_unsynced().await?;
    tracing::debug!(
        count = records.len(),
        backend = store.backend_name(),
        "Fetched unsynced records"
    );
    Ok(records)
}
