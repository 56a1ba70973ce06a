//! Customer-data access control.
//!
//! Staff reads of another customer's cart or order history go through this
//! guard. An absent cart or empty history is a valid result, distinct from
//! an authorization failure.

use chrono::Duration;
use common::UserId;
use domain::{Order, Role, ShoppingCart, User};
use store::{CartStore, OrderStore, UserStore};

use crate::error::{Result, ServiceError};

/// Roles allowed to read another customer's cart and order history.
const CUSTOMER_DATA_ROLES: &[Role] = &[Role::Administrator, Role::CustomerService];

/// Authorizes cross-customer reads of cart and order data.
pub struct CustomerDataAccess<U, C, O>
where
    U: UserStore,
    C: CartStore,
    O: OrderStore,
{
    users: U,
    carts: C,
    orders: O,
}

impl<U, C, O> CustomerDataAccess<U, C, O>
where
    U: UserStore,
    C: CartStore,
    O: OrderStore,
{
    /// Creates a new access guard.
    pub fn new(users: U, carts: C, orders: O) -> Self {
        Self {
            users,
            carts,
            orders,
        }
    }

    /// Returns a customer's cart, if they have one.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer_cart(
        &self,
        acting_user_id: UserId,
        target_user_id: UserId,
    ) -> Result<Option<ShoppingCart>> {
        self.authorize(acting_user_id, CUSTOMER_DATA_ROLES, "view customer carts")
            .await?;
        Ok(self.carts.get_by_user_id(target_user_id).await?)
    }

    /// Returns a customer's full order history, unordered and unpaginated.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer_order_history(
        &self,
        acting_user_id: UserId,
        target_user_id: UserId,
    ) -> Result<Vec<Order>> {
        self.authorize(acting_user_id, CUSTOMER_DATA_ROLES, "view customer orders")
            .await?;
        Ok(self.orders.get_by_user_id(target_user_id).await?)
    }

    /// Returns all orders created within the given window before now.
    ///
    /// Administrator-only reporting query.
    #[tracing::instrument(skip(self))]
    pub async fn get_recent_orders(
        &self,
        acting_user_id: UserId,
        window: Duration,
    ) -> Result<Vec<Order>> {
        self.authorize(acting_user_id, &[Role::Administrator], "view recent orders")
            .await?;
        Ok(self.orders.get_recent(window).await?)
    }

    /// Loads the acting user and checks role membership.
    ///
    /// A missing user and a missing role are the same failure to the caller.
    async fn authorize(
        &self,
        acting_user_id: UserId,
        required: &[Role],
        action: &'static str,
    ) -> Result<User> {
        self.users
            .get_by_id(acting_user_id)
            .await?
            .filter(|user| user.has_any_role(required))
            .ok_or(ServiceError::Unauthorized {
                user_id: acting_user_id,
                action,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;
    use store::{InMemoryCartStore, InMemoryOrderStore, InMemoryUserStore};

    struct Fixture {
        access: CustomerDataAccess<InMemoryUserStore, InMemoryCartStore, InMemoryOrderStore>,
        users: InMemoryUserStore,
        carts: InMemoryCartStore,
        orders: InMemoryOrderStore,
    }

    async fn setup() -> Fixture {
        let users = InMemoryUserStore::new();
        let carts = InMemoryCartStore::new();
        let orders = InMemoryOrderStore::new();
        let access = CustomerDataAccess::new(users.clone(), carts.clone(), orders.clone());
        Fixture {
            access,
            users,
            carts,
            orders,
        }
    }

    async fn user_with(users: &InMemoryUserStore, roles: &[Role]) -> UserId {
        let user = User::with_roles(
            UserId::new(),
            "staff",
            "staff@example.com",
            "Staff Member",
            roles.iter().copied(),
        );
        let id = user.id;
        users.insert(user).await;
        id
    }

    #[tokio::test]
    async fn customer_service_can_view_cart() {
        let f = setup().await;
        let agent = user_with(&f.users, &[Role::CustomerService]).await;
        let target = UserId::new();

        let mut cart = ShoppingCart::new(target);
        cart.add_item("SKU-001", "Widget", Money::from_minor(1000), 1)
            .unwrap();
        f.carts.save(cart).await.unwrap();

        let loaded = f.access.get_customer_cart(agent, target).await.unwrap();
        assert_eq!(loaded.unwrap().item_count(), 1);
    }

    #[tokio::test]
    async fn administrator_can_view_order_history() {
        let f = setup().await;
        let admin = user_with(&f.users, &[Role::Administrator]).await;
        let target = UserId::new();
        f.orders
            .create(Order::new(target, vec![], Money::zero()))
            .await
            .unwrap();

        let history = f
            .access
            .get_customer_order_history(admin, target)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn absent_cart_is_none_not_an_error() {
        let f = setup().await;
        let agent = user_with(&f.users, &[Role::CustomerService]).await;

        let loaded = f
            .access
            .get_customer_cart(agent, UserId::new())
            .await
            .unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn regular_customer_is_rejected_even_when_data_exists() {
        let f = setup().await;
        let customer = user_with(&f.users, &[]).await;
        let target = UserId::new();
        f.carts.save(ShoppingCart::new(target)).await.unwrap();

        let err = f
            .access
            .get_customer_cart(customer, target)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));

        let err = f
            .access
            .get_customer_order_history(customer, target)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn unknown_acting_user_is_rejected() {
        let f = setup().await;
        let err = f
            .access
            .get_customer_cart(UserId::new(), UserId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn recent_orders_requires_administrator() {
        let f = setup().await;
        let agent = user_with(&f.users, &[Role::CustomerService]).await;
        let admin = user_with(&f.users, &[Role::Administrator]).await;
        f.orders
            .create(Order::new(UserId::new(), vec![], Money::zero()))
            .await
            .unwrap();

        let err = f
            .access
            .get_recent_orders(agent, Duration::hours(24))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));

        let recent = f
            .access
            .get_recent_orders(admin, Duration::hours(24))
            .await
            .unwrap();
        assert_eq!(recent.len(), 1);
    }
}
