//! Inventory management.

use common::{ProductId, UserId};
use domain::{Product, Role};
use store::{ProductStore, UserStore};

use crate::error::{Result, ServiceError};

/// Authorizes and applies stock-level changes.
pub struct InventoryManager<U, P>
where
    U: UserStore,
    P: ProductStore,
{
    users: U,
    products: P,
}

impl<U, P> InventoryManager<U, P>
where
    U: UserStore,
    P: ProductStore,
{
    /// Creates a new inventory manager.
    pub fn new(users: U, products: P) -> Self {
        Self { users, products }
    }

    /// Sets a product's stock level on behalf of an administrator.
    ///
    /// Fails with [`ServiceError::Unauthorized`] when the acting user is
    /// unknown or not an `Administrator`, with
    /// [`ServiceError::ProductNotFound`] for an unknown product, and with a
    /// domain validation error for a negative level — in that order, with no
    /// mutation on any failure.
    #[tracing::instrument(skip(self))]
    pub async fn update_stock(
        &self,
        acting_user_id: UserId,
        product_id: ProductId,
        new_stock_level: i64,
    ) -> Result<Product> {
        let authorized = self
            .users
            .get_by_id(acting_user_id)
            .await?
            .is_some_and(|user| user.has_role(Role::Administrator));
        if !authorized {
            return Err(ServiceError::Unauthorized {
                user_id: acting_user_id,
                action: "manage inventory",
            });
        }

        let mut product = self
            .products
            .get_by_id(&product_id)
            .await?
            .ok_or(ServiceError::ProductNotFound(product_id))?;

        product.update_stock_level(new_stock_level)?;
        self.products.save(product.clone()).await?;

        tracing::info!(
            product_id = %product.id,
            stock_level = product.stock_level(),
            "stock level updated"
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;
    use domain::{DomainError, User};
    use store::{InMemoryProductStore, InMemoryUserStore};

    async fn setup() -> (
        InventoryManager<InMemoryUserStore, InMemoryProductStore>,
        InMemoryUserStore,
        InMemoryProductStore,
    ) {
        let users = InMemoryUserStore::new();
        let products = InMemoryProductStore::new();
        products
            .insert(Product::new(
                "SKU-001",
                "Widget",
                Money::from_minor(1000),
                5,
                "widget.png",
            ))
            .await;

        let manager = InventoryManager::new(users.clone(), products.clone());
        (manager, users, products)
    }

    async fn admin(users: &InMemoryUserStore) -> UserId {
        let user = User::with_roles(
            UserId::new(),
            "admin",
            "admin@example.com",
            "Site Admin",
            [Role::Administrator],
        );
        let id = user.id;
        users.insert(user).await;
        id
    }

    #[tokio::test]
    async fn admin_can_update_stock() {
        let (manager, users, products) = setup().await;
        let admin_id = admin(&users).await;

        let product = manager
            .update_stock(admin_id, ProductId::new("SKU-001"), 42)
            .await
            .unwrap();

        assert_eq!(product.stock_level(), 42);
        let persisted = products
            .get_by_id(&ProductId::new("SKU-001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.stock_level(), 42);
    }

    #[tokio::test]
    async fn non_admin_is_rejected_without_mutation() {
        let (manager, users, products) = setup().await;
        let user = User::with_roles(
            UserId::new(),
            "support",
            "support@example.com",
            "Support Agent",
            [Role::CustomerService],
        );
        let user_id = user.id;
        users.insert(user).await;

        let err = manager
            .update_stock(user_id, ProductId::new("SKU-001"), 42)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Unauthorized { .. }));
        let persisted = products
            .get_by_id(&ProductId::new("SKU-001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.stock_level(), 5);
    }

    #[tokio::test]
    async fn unknown_acting_user_is_unauthorized() {
        let (manager, _, _) = setup().await;
        let err = manager
            .update_stock(UserId::new(), ProductId::new("SKU-001"), 42)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn negative_level_fails_even_for_admin() {
        let (manager, users, products) = setup().await;
        let admin_id = admin(&users).await;

        let err = manager
            .update_stock(admin_id, ProductId::new("SKU-001"), -3)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::NegativeStockLevel(-3))
        ));
        let persisted = products
            .get_by_id(&ProductId::new("SKU-001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.stock_level(), 5);
    }

    #[tokio::test]
    async fn unknown_product_fails() {
        let (manager, users, _) = setup().await;
        let admin_id = admin(&users).await;

        let err = manager
            .update_stock(admin_id, ProductId::new("SKU-404"), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ProductNotFound(_)));
    }
}
