//! Domain error types
//!
//! This module defines the error hierarchy for erpsync. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main erpsync error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ErpSyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Record store errors
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    /// Downstream (CRM) errors
    #[error("CRM error: {0}")]
    Downstream(#[from] DownstreamError),

    /// Batch size must be at least one
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// Another sync run holds the run lock
    #[error("A sync run is already in progress")]
    SyncInProgress,

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ErpSyncError {
    /// Whether this error means the record store cannot be reached
    ///
    /// Unavailability aborts a whole sync run instead of being retried per record.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, ErpSyncError::Store(e) if e.is_unavailable())
    }
}

/// Record store errors
///
/// Errors raised by a [`RecordStore`](crate::adapters::store::RecordStore)
/// implementation. Driver and pool error types are flattened to strings.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached (pool exhausted, connection refused, connection lost)
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// A statement was rejected by the store
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction control (BEGIN/COMMIT/ROLLBACK) failed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// A row could not be decoded into a domain type
    #[error("Failed to decode row: {0}")]
    Decode(String),
}

impl StoreError {
    /// Returns true for errors that mean the whole store is unreachable
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Downstream CRM errors
///
/// Every variant is transient from the committer's point of view: the attempt
/// is rolled back and retried until the retry budget is spent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DownstreamError {
    /// The CRM refused the record
    #[error("CRM rejected record: {0}")]
    Rejected(String),

    /// The CRM could not be reached
    #[error("CRM unreachable: {0}")]
    Unreachable(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for ErpSyncError {
    fn from(err: std::io::Error) -> Self {
        ErpSyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ErpSyncError {
    fn from(err: serde_json::Error) -> Self {
        ErpSyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ErpSyncError {
    fn from(err: toml::de::Error) -> Self {
        ErpSyncError::Configuration(format!("TOML parse error: {err}"))
    }
}
