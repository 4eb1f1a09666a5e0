//! External system integrations for erpsync.
//!
//! - [`store`] - Record store abstraction (trait-based) and the in-memory backend
//! - [`postgresql`] - PostgreSQL record store
//! - [`crm`] - Downstream CRM client abstraction and the simulated CRM
//!
//! # Design Pattern
//!
//! Adapters isolate external systems behind traits so the sync engine can be
//! exercised with in-process doubles.
//!
//! ```rust,no_run
//! use erpsync::adapters::store::{MemoryStore, RecordStore};
//! use erpsync::domain::seed_customers;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::with_customers(seed_customers());
//! let pending = store.fetch_unsynced().await?;
//! assert_eq!(pending.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod crm;
pub mod postgresql;
pub mod store;
