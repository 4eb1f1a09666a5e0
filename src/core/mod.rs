//! Core business logic for erpsync.
//!
//! # Modules
//!
//! - [`sync`] - Sync engine: reader, batcher, transformer, retry-protected committer
//! - [`scheduler`] - Periodic trigger
//! - [`bootstrap`] - Store availability wait, schema provisioning and seed data
//!
//! # Sync Workflow
//!
//! 1. **Fetch**: Select every customer with `synced = false`
//! 2. **Batch**: Split them into fixed-size, order-preserving batches
//! 3. **Transform**: Map each record to the CRM payload
//! 4. **Commit**: Push to the CRM, log `SUCCESS` and flag the record in one
//!    transaction, retrying with a fixed delay
//! 5. **Exhaust**: Log `FAILED` once the attempts are spent
//! 6. **Report**: Return a [`sync::SyncSummary`]

pub mod bootstrap;
pub mod scheduler;
pub mod sync;

pub use scheduler::{SchedulerHandle, SyncScheduler};
pub use sync::{SyncEngine, SyncSummary};
