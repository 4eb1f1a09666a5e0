//! ERP to CRM sync engine
//!
//! Reader → Batcher → (Transformer + Committer), driven sequentially by
//! [`SyncEngine`].
//!
//! # Example
//!
//! ```rust,no_run
//! use erpsync::adapters::crm::SimulatedCrm;
//! use erpsync::adapters::store::MemoryStore;
//! use erpsync::config::SyncConfig;
//! use erpsync::core::sync::SyncEngine;
//! use erpsync::domain::seed_customers;
//! use std::sync::Arc;
//!
//! # async fn example() -> erpsync::domain::Result<()> {
//! let store = Arc::new(MemoryStore::with_customers(seed_customers()));
//! let crm = Arc::new(SimulatedCrm::new(0.2));
//! let engine = SyncEngine::new(store, crm, &SyncConfig::default())?;
//!
//! let summary = engine.run_sync().await?;
//! println!("{} of {} records synced", summary.succeeded, summary.processed);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod committer;
pub mod engine;
pub mod reader;
pub mod summary;
pub mod transform;

pub use batch::chunk;
pub use committer::{CommitOutcome, Committer, RetryPolicy};
pub use engine::SyncEngine;
pub use reader::fetch_unsynced;
pub use summary::SyncSummary;
pub use transform::transform;
