//! Store startup: wait for availability, provision the schema, seed demo data

use crate::adapters::store::RecordStore;
use crate::config::{ErpSyncConfig, PostgreSQLConfig};
use crate::domain::{seed_customers, Result};
use std::time::Duration;

/// Startup behaviour derived from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupOptions {
    /// Delay between availability probes
    pub retry_interval: Duration,
    /// Probes before giving up, 0 = wait forever
    pub max_attempts: u32,
    /// Insert demo customers into an empty customer table
    pub seed_on_empty: bool,
}

impl StartupOptions {
    /// Options for the configured backend
    ///
    /// The memory backend has no `[postgresql]` section and uses the defaults.
    pub fn from_config(config: &ErpSyncConfig) -> Self {
        match config.postgresql {
            Some(ref pg) => Self::from_postgresql(pg),
            None => Self::default(),
        }
    }

    fn from_postgresql(config: &PostgreSQLConfig) -> Self {
        Self {
            retry_interval: config.startup_retry_interval(),
            max_attempts: config.startup_max_attempts,
            seed_on_empty: config.seed_on_empty,
        }
    }
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            retry_interval: Duration::from_secs(2),
            max_attempts: 0,
            seed_on_empty: true,
        }
    }
}

/// Probe the store until it answers
///
/// # Errors
///
/// Returns the last probe error once `max_attempts` probes failed.
pub async fn wait_for_store(store: &dyn RecordStore, options: &StartupOptions) -> Result<()> {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match store.ping().await {
            Ok(()) => {
                tracing::info!(backend = store.backend_name(), attempt, "Record store is available");
                return Ok(());
            }
            Err(e) if options.max_attempts != 0 && attempt >= options.max_attempts => {
                tracing::error!(attempt, error = %e, "Record store did not become available");
                return Err(e);
            }
            Err(e) => {
                tracing::info!(
                    attempt,
                    retry_in_ms = options.retry_interval.as_millis() as u64,
                    error = %e,
                    "Waiting for database..."
                );
                tokio::time::sleep(options.retry_interval).await;
            }
        }
    }
}

/// Create the tables and seed demo customers into an empty customer table
///
/// Returns the number of customers inserted.
///
/// # Errors
///
/// Returns an error if the schema can't be created or a seed insert fails.
pub async fn provision(store: &dyn RecordStore, options: &StartupOptions) -> Result<usize> {
    store.ensure_schema().await?;

    if !options.seed_on_empty {
        return Ok(0);
    }

    let existing = store.count_customers().await?;
    if existing > 0 {
        tracing::debug!(existing, "Customer table not empty, skipping seed");
        return Ok(0);
    }

    let customers = seed_customers();
    for customer in &customers {
        store.insert_customer(customer).await?;
    }

    tracing::info!(count = customers.len(), "Seeded demo customers");
    Ok(customers.len())
}

/// Wait for the store, then provision it
///
/// # Errors
///
/// Returns an error if the store never becomes available or provisioning fails.
pub async fn prepare_store(store: &dyn RecordStore, options: &StartupOptions) -> Result<usize> {
    wait_for_store(store, options).await?;
    provision(store, options).await
}
