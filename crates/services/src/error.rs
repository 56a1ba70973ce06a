//! Service error types.

use common::{ProductId, UserId};
use domain::DomainError;
use store::StoreError;
use thiserror::Error;

/// Errors that can occur in the use-case layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The acting user is missing or lacks the role required for the action.
    #[error("User {user_id} is not authorized to {action}")]
    Unauthorized {
        user_id: UserId,
        action: &'static str,
    },

    /// The requested quantity exceeds the available stock.
    #[error(
        "Insufficient stock for {product_id}: requested {requested}, available {available}"
    )]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Input failed a format or range check before any persistence call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Checkout was attempted with no cart, or an empty one.
    #[error("Cart is empty, nothing to check out")]
    EmptyCart,

    /// The payment gateway reported a status outside the known set.
    /// Fatal for the checkout; never downgraded.
    #[error("Unexpected payment outcome: {0}")]
    UnexpectedPaymentOutcome(String),

    /// The payment gateway call itself failed.
    #[error("Payment gateway error: {0}")]
    PaymentGateway(String),

    /// An aggregate invariant was violated.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// A storage operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for service results.
pub type Result<T> = std::result::Result<T, ServiceError>;
