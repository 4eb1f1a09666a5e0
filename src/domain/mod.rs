//! Domain models and types for erpsync.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RecordId`], [`LogEntryId`])
//! - **Domain models** ([`CustomerRecord`], [`SyncPayload`], [`SyncLogEntry`])
//! - **Error types** ([`ErpSyncError`], [`StoreError`], [`DownstreamError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ErpSyncError>`]:
//!
//! ```rust
//! use erpsync::domain::{Result, StoreError};
//!
//! fn example() -> Result<()> {
//!     // Store errors convert into ErpSyncError
//!     Err(StoreError::Unavailable("connection refused".to_string()).into())
//! }
//!
//! assert!(example().unwrap_err().is_store_unavailable());
//! ```

pub mod customer;
pub mod errors;
pub mod ids;
pub mod result;
pub mod sync_log;

// Re-export commonly used types for convenience
pub use customer::{seed_customers, CustomerRecord, NewCustomer, SyncPayload};
pub use errors::{DownstreamError, ErpSyncError, StoreError};
pub use ids::{LogEntryId, RecordId};
pub use result::Result;
pub use sync_log::{SyncLogEntry, SyncStatus};
