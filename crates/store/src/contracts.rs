//! Collaborator contracts for persistence.
//!
//! All traits are object-safe, `Send + Sync`, and implementation-agnostic:
//! a SQL-backed host implements them against its schema, tests use the
//! in-memory versions from [`crate::memory`].

use async_trait::async_trait;
use chrono::Duration;
use common::{ProductId, UserId};
use domain::{Order, Product, ShoppingCart, User};

use crate::Result;

/// Storage for product catalog entries.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Retrieves a product by its ID.
    ///
    /// Returns `None` if no such product exists.
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Persists a product, replacing any previous record for the same ID.
    async fn save(&self, product: Product) -> Result<()>;
}

/// Storage for shopping carts, keyed by the owning user.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Retrieves the cart owned by a user.
    ///
    /// Returns `None` if the user has no cart; absence is not an error.
    async fn get_by_user_id(&self, user_id: UserId) -> Result<Option<ShoppingCart>>;

    /// Persists a cart, replacing any previous cart for the same user.
    async fn save(&self, cart: ShoppingCart) -> Result<()>;

    /// Deletes the cart owned by a user, if any.
    async fn delete_by_user_id(&self, user_id: UserId) -> Result<()>;
}

/// Storage for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a newly created order.
    async fn create(&self, order: Order) -> Result<()>;

    /// Persists a status change to an existing order.
    ///
    /// Fails with [`crate::StoreError::UnknownOrder`] if the order was never
    /// created.
    async fn update(&self, order: &Order) -> Result<()>;

    /// Retrieves all orders placed by a user, unordered.
    async fn get_by_user_id(&self, user_id: UserId) -> Result<Vec<Order>>;

    /// Retrieves orders created within the given window before now.
    async fn get_recent(&self, window: Duration) -> Result<Vec<Order>>;
}

/// Storage for user records.
///
/// All lookups return `None` for an unknown user, distinct from a storage
/// fault.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Retrieves a user by ID.
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Retrieves a user by login name.
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Retrieves a user by email address.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;
}
