//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with `tracing-subscriber`
//! - `RUST_LOG` / configured log levels
//! - JSON file logging with rotation via `tracing-appender`
//!
//! # Example
//!
//! ```no_run
//! use erpsync::logging::init_logging;
//! use erpsync::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a commit attempt for a record
///
/// # Example
///
/// ```no_run
/// use erpsync::log_sync_attempt;
/// use erpsync::domain::RecordId;
///
/// log_sync_attempt!(RecordId::new(1), 2, 3);
/// ```
#[macro_export]
macro_rules! log_sync_attempt {
    ($record_id:expr, $attempt:expr, $max_attempts:expr) => {
        tracing::info!(
            record_id = %$record_id,
            attempt = $attempt,
            max_attempts = $max_attempts,
            "Processing ERP record"
        );
    };
}

/// Log a batch processing operation
///
/// # Example
///
/// ```no_run
/// use erpsync::log_batch_processing;
///
/// log_batch_processing!(1, 3, 2);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($current:expr, $total:expr, $size:expr) => {
        tracing::debug!(
            batch = $current,
            total_batches = $total,
            batch_size = $size,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing batch"
        );
    };
}

/// Log a retry after a failed attempt
///
/// # Example
///
/// ```no_run
/// use erpsync::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Simulated CRM failure");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Attempt failed, retrying"
        );
    };
}
