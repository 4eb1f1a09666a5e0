//! CLI command implementations
//!
//! Commands return the process exit code:
//! 0 success, 1 run finished with failed records, 2 configuration error,
//! 4 record store unavailable, 5 fatal error.

pub mod init;
pub mod logs;
pub mod serve;
pub mod sync;
pub mod validate;

use crate::adapters::crm::SimulatedCrm;
use crate::adapters::store::{create_record_store, RecordStore};
use crate::config::{load_config, ErpSyncConfig};
use crate::core::bootstrap::{prepare_store, StartupOptions};
use crate::core::sync::SyncEngine;
use crate::domain::ErpSyncError;
use std::sync::Arc;

/// Map an error to the exit code of the command that hit it
pub fn exit_code_for(error: &ErpSyncError) -> i32 {
    match error {
        ErpSyncError::Configuration(_) | ErpSyncError::InvalidBatchSize(_) => 2,
        e if e.is_store_unavailable() => 4,
        _ => 5,
    }
}

/// Load the configuration, printing the failure
fn load_or_report(config_path: &str) -> Result<ErpSyncConfig, i32> {
    load_config(config_path).map_err(|e| {
        println!("❌ Failed to load configuration file");
        println!("   Error: {e}");
        exit_code_for(&e)
    })
}

/// Create the configured store, wait for it and provision it
async fn open_store(config: &ErpSyncConfig) -> Result<Arc<dyn RecordStore>, i32> {
    let store = create_record_store(config).map_err(|e| {
        println!("❌ Failed to create record store");
        println!("   Error: {e}");
        exit_code_for(&e)
    })?;

    let options = StartupOptions::from_config(config);
    if let Err(e) = prepare_store(store.as_ref(), &options).await {
        println!("❌ Record store is not ready");
        println!("   Error: {e}");
        return Err(exit_code_for(&e));
    }

    Ok(store)
}

/// Build the engine over `store` with the simulated CRM
fn build_engine(config: &ErpSyncConfig, store: Arc<dyn RecordStore>) -> Result<Arc<SyncEngine>, i32> {
    let crm = Arc::new(SimulatedCrm::from_config(&config.crm));
    SyncEngine::new(store, crm, &config.sync)
        .map(Arc::new)
        .map_err(|e| {
            println!("❌ Failed to create sync engine");
            println!("   Error: {e}");
            exit_code_for(&e)
        })
}
