//! In-memory store implementations.
//!
//! Thread-safe over `Arc<RwLock<…>>`; cloning a store shares the underlying
//! state, which lets tests hold a handle while services own another.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use common::{OrderId, ProductId, UserId};
use domain::{Order, Product, ShoppingCart, User};
use tokio::sync::RwLock;

use crate::contracts::{CartStore, OrderStore, ProductStore, UserStore};
use crate::{Result, StoreError};

/// In-memory product store.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductStore {
    /// Creates a new empty product store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a product, bypassing the async API.
    pub async fn insert(&self, product: Product) {
        self.products
            .write()
            .await
            .insert(product.id.clone(), product);
    }

    /// Returns the number of products stored.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn save(&self, product: Product) -> Result<()> {
        self.products
            .write()
            .await
            .insert(product.id.clone(), product);
        Ok(())
    }
}

/// In-memory cart store.
#[derive(Clone, Default)]
pub struct InMemoryCartStore {
    carts: Arc<RwLock<HashMap<UserId, ShoppingCart>>>,
}

impl InMemoryCartStore {
    /// Creates a new empty cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of carts stored.
    pub async fn cart_count(&self) -> usize {
        self.carts.read().await.len()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get_by_user_id(&self, user_id: UserId) -> Result<Option<ShoppingCart>> {
        Ok(self.carts.read().await.get(&user_id).cloned())
    }

    async fn save(&self, cart: ShoppingCart) -> Result<()> {
        self.carts.write().await.insert(cart.user_id, cart);
        Ok(())
    }

    async fn delete_by_user_id(&self, user_id: UserId) -> Result<()> {
        self.carts.write().await.remove(&user_id);
        Ok(())
    }
}

#[derive(Default)]
struct OrderStoreState {
    orders: HashMap<OrderId, Order>,
    update_count: u64,
}

/// In-memory order store.
///
/// Tracks how many `update` calls were issued so tests can assert that a
/// `Pending` payment outcome performs no status-update persistence.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<OrderStoreState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns the number of `update` calls issued so far.
    pub async fn update_count(&self) -> u64 {
        self.state.read().await.update_count
    }

    /// Retrieves a single order by ID.
    pub async fn get(&self, id: OrderId) -> Option<Order> {
        self.state.read().await.orders.get(&id).cloned()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: Order) -> Result<()> {
        self.state.write().await.orders.insert(order.id, order);
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<()> {
        let mut state = self.state.write().await;
        state.update_count += 1;
        match state.orders.get_mut(&order.id) {
            Some(existing) => {
                *existing = order.clone();
                Ok(())
            }
            None => Err(StoreError::UnknownOrder(order.id)),
        }
    }

    async fn get_by_user_id(&self, user_id: UserId) -> Result<Vec<Order>> {
        Ok(self
            .state
            .read()
            .await
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_recent(&self, window: Duration) -> Result<Vec<Order>> {
        let cutoff = Utc::now() - window;
        Ok(self
            .state
            .read()
            .await
            .orders
            .values()
            .filter(|o| o.created_at() >= cutoff)
            .cloned()
            .collect())
    }
}

/// In-memory user store.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserStore {
    /// Creates a new empty user store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a user.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;
    use domain::Role;

    #[tokio::test]
    async fn product_store_save_and_get() {
        let store = InMemoryProductStore::new();
        let product = Product::new("SKU-001", "Widget", Money::from_minor(1000), 5, "widget.png");

        store.save(product.clone()).await.unwrap();

        let loaded = store.get_by_id(&ProductId::new("SKU-001")).await.unwrap();
        assert_eq!(loaded, Some(product));
        assert_eq!(store.product_count().await, 1);
    }

    #[tokio::test]
    async fn product_store_get_missing_returns_none() {
        let store = InMemoryProductStore::new();
        let loaded = store.get_by_id(&ProductId::new("SKU-404")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn product_store_save_replaces() {
        let store = InMemoryProductStore::new();
        let mut product =
            Product::new("SKU-001", "Widget", Money::from_minor(1000), 5, "widget.png");
        store.save(product.clone()).await.unwrap();

        product.update_stock_level(9).unwrap();
        store.save(product).await.unwrap();

        let loaded = store
            .get_by_id(&ProductId::new("SKU-001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.stock_level(), 9);
        assert_eq!(store.product_count().await, 1);
    }

    #[tokio::test]
    async fn cart_store_absent_cart_is_none() {
        let store = InMemoryCartStore::new();
        let cart = store.get_by_user_id(UserId::new()).await.unwrap();
        assert!(cart.is_none());
    }

    #[tokio::test]
    async fn cart_store_save_get_delete() {
        let store = InMemoryCartStore::new();
        let user_id = UserId::new();
        let mut cart = ShoppingCart::new(user_id);
        cart.add_item("SKU-001", "Widget", Money::from_minor(1000), 1)
            .unwrap();

        store.save(cart.clone()).await.unwrap();
        assert_eq!(store.get_by_user_id(user_id).await.unwrap(), Some(cart));

        store.delete_by_user_id(user_id).await.unwrap();
        assert!(store.get_by_user_id(user_id).await.unwrap().is_none());
        assert_eq!(store.cart_count().await, 0);
    }

    #[tokio::test]
    async fn cart_store_delete_missing_is_noop() {
        let store = InMemoryCartStore::new();
        store.delete_by_user_id(UserId::new()).await.unwrap();
    }

    #[tokio::test]
    async fn order_store_create_and_query_by_user() {
        let store = InMemoryOrderStore::new();
        let user_id = UserId::new();
        let order = Order::new(user_id, vec![], Money::zero());
        let order_id = order.id;

        store.create(order).await.unwrap();

        let orders = store.get_by_user_id(user_id).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, order_id);

        let other = store.get_by_user_id(UserId::new()).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn order_store_update_persists_status() {
        let store = InMemoryOrderStore::new();
        let mut order = Order::new(UserId::new(), vec![], Money::zero());
        store.create(order.clone()).await.unwrap();

        order.mark_paid().unwrap();
        store.update(&order).await.unwrap();

        let loaded = store.get(order.id).await.unwrap();
        assert_eq!(loaded.status(), domain::OrderStatus::Paid);
        assert_eq!(store.update_count().await, 1);
    }

    #[tokio::test]
    async fn order_store_update_unknown_order_fails() {
        let store = InMemoryOrderStore::new();
        let order = Order::new(UserId::new(), vec![], Money::zero());

        let err = store.update(&order).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownOrder(id) if id == order.id));
    }

    #[tokio::test]
    async fn order_store_get_recent_filters_by_window() {
        let store = InMemoryOrderStore::new();
        let order = Order::new(UserId::new(), vec![], Money::zero());
        store.create(order).await.unwrap();

        let recent = store.get_recent(Duration::hours(1)).await.unwrap();
        assert_eq!(recent.len(), 1);

        let none = store.get_recent(Duration::zero()).await.unwrap();
        // A zero window still includes orders created at exactly the cutoff;
        // a negative one cannot match anything.
        assert!(none.len() <= 1);
        let past = store.get_recent(Duration::hours(-1)).await.unwrap();
        assert!(past.is_empty());
    }

    #[tokio::test]
    async fn user_store_lookups() {
        let store = InMemoryUserStore::new();
        let user = User::with_roles(
            UserId::new(),
            "admin",
            "admin@example.com",
            "Site Admin",
            [Role::Administrator],
        );
        let id = user.id;
        store.insert(user).await;

        assert!(store.get_by_id(id).await.unwrap().is_some());
        assert!(store.get_by_username("admin").await.unwrap().is_some());
        assert!(
            store
                .get_by_email("admin@example.com")
                .await
                .unwrap()
                .is_some()
        );

        assert!(store.get_by_id(UserId::new()).await.unwrap().is_none());
        assert!(store.get_by_username("nobody").await.unwrap().is_none());
        assert!(
            store
                .get_by_email("nobody@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }
}
