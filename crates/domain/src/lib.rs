//! Domain layer for the order-fulfillment core.
//!
//! This crate provides the aggregates and value objects:
//! - Product catalog entries with guarded stock levels
//! - The ShoppingCart aggregate with merge-on-add semantics
//! - The Order aggregate with its Pending → Paid/PaymentFailed state machine
//! - Users and their role set for authorization decisions

pub mod cart;
pub mod error;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartItem, ShoppingCart};
pub use error::DomainError;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::Product;
pub use user::{Role, User};
