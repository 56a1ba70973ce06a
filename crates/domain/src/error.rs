//! Domain error types.

use thiserror::Error;

use crate::order::OrderStatus;

/// Errors that can occur during domain operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A stock level was set to a negative value.
    #[error("Stock level cannot be negative: {0}")]
    NegativeStockLevel(i64),

    /// A stock level exceeded the representable range.
    #[error("Stock level out of range: {0}")]
    StockLevelTooLarge(i64),

    /// An item was added with a non-positive quantity.
    #[error("Quantity must be positive: {0}")]
    NonPositiveQuantity(i64),

    /// A required identifier was empty.
    #[error("Required identifier is empty: {0}")]
    EmptyIdentifier(&'static str),

    /// An order status transition was attempted from a state that does not allow it.
    #[error("Invalid order status transition from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },
}
