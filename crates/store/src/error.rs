//! Store error types.

use common::OrderId;
use thiserror::Error;

/// Errors that can occur during storage operations.
///
/// "Row absent" is not an error here: lookups return `Option`/empty results
/// and the caller decides whether absence is meaningful. These variants
/// cover genuine storage faults.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed (connection loss, constraint violation, ...).
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// An update was issued for an order that was never created.
    #[error("Cannot update unknown order: {0}")]
    UnknownOrder(OrderId),
}
