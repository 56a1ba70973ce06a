//! Persistence contracts for the order-fulfillment core.
//!
//! The domain layer never talks to a database directly; it goes through the
//! traits in [`contracts`]. The [`memory`] module provides thread-safe
//! in-memory implementations used by tests and by hosts that do not need
//! durable storage.

pub mod contracts;
pub mod error;
pub mod memory;

pub use contracts::{CartStore, OrderStore, ProductStore, UserStore};
pub use error::StoreError;
pub use memory::{InMemoryCartStore, InMemoryOrderStore, InMemoryProductStore, InMemoryUserStore};

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;
