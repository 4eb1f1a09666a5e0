//! Result type alias for erpsync
//!
//! This module provides a convenient Result type alias that uses ErpSyncError
//! as the error type.

use super::errors::ErpSyncError;

/// Result type alias for erpsync operations
///
/// # Examples
///
/// ```
/// use erpsync::domain::result::Result;
/// use erpsync::domain::errors::ErpSyncError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ErpSyncError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ErpSyncError>;
