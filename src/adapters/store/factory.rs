//! Record store factory
//!
//! Creates the configured [`RecordStore`] implementation.

use crate::adapters::postgresql::{PostgreSQLClient, PostgreSQLStore};
use crate::adapters::store::memory::MemoryStore;
use crate::adapters::store::traits::RecordStore;
use crate::config::schema::{ErpSyncConfig, StoreBackend};
use crate::domain::{ErpSyncError, Result};
use std::sync::Arc;

/// Create a record store based on the configuration
///
/// The PostgreSQL pool is created lazily, so this succeeds even while the
/// database is still starting. Use [`RecordStore::ping`] to wait for it.
///
/// # Errors
///
/// Returns a configuration error if the selected backend has no settings or
/// the connection string can't be parsed.
pub fn create_record_store(config: &ErpSyncConfig) -> Result<Arc<dyn RecordStore>> {
    match config.store_backend {
        StoreBackend::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                ErpSyncError::Configuration(
                    "postgresql configuration is required when store_backend = 'postgresql'"
                        .to_string(),
                )
            })?;

            let client = PostgreSQLClient::new(pg_config.clone())?;
            tracing::info!(
                target_db = %client.connection_string_safe(),
                "Creating PostgreSQL record store"
            );

            Ok(Arc::new(PostgreSQLStore::new(client)))
        }
        StoreBackend::Memory => {
            tracing::info!("Creating in-memory record store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
