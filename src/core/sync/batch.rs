//! Order-preserving batching

use crate::domain::{ErpSyncError, Result};

/// Split `items` into consecutive groups of at most `size` elements
///
/// Every group except possibly the last holds exactly `size` elements, and
/// concatenating the groups yields `items` in the original order.
///
/// # Errors
///
/// Returns [`ErpSyncError::InvalidBatchSize`] if `size` is zero.
///
/// # Examples
///
/// ```
/// use erpsync::core::sync::chunk;
///
/// let batches = chunk(&[1, 2, 3, 4, 5], 2).unwrap();
/// assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(ErpSyncError::InvalidBatchSize(size));
    }
    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}
