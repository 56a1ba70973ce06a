//! Shopping cart aggregate.

use common::{Money, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A priced line item in a shopping cart.
///
/// The unit price is a snapshot captured when the item was first added; it
/// is not re-read from the product catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product identifier.
    pub product_id: ProductId,

    /// Human-readable product name.
    pub product_name: String,

    /// Price per unit at the time the item was added.
    pub price_snapshot: Money,

    /// Quantity in the cart. Always positive; an item at quantity zero is
    /// removed rather than kept.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a new cart item.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        price_snapshot: Money,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            price_snapshot,
            quantity,
        }
    }

    /// Returns the line total (price snapshot × quantity).
    pub fn line_total(&self) -> Money {
        self.price_snapshot.multiply(self.quantity)
    }
}

/// A user's shopping cart: an ordered list of line items, at most one per
/// product.
///
/// Carts are created lazily on the first add and deleted once checkout
/// completes or the last item is removed; both lifecycle decisions belong to
/// the callers, not the aggregate. The aggregate performs no stock checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCart {
    /// The owning user. A cart is exclusively owned by one user.
    pub user_id: UserId,

    items: Vec<CartItem>,
}

impl ShoppingCart {
    /// Creates a new empty cart for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
        }
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the number of distinct line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item for a product, if present.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Adds a quantity of a product to the cart.
    ///
    /// If the product is already in the cart its quantity is incremented and
    /// the existing price snapshot is kept; otherwise a new item is appended
    /// with the given snapshot. Rejects non-positive quantities.
    pub fn add_item(
        &mut self,
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        price_snapshot: Money,
        quantity: u32,
    ) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::NonPositiveQuantity(0));
        }
        let product_id = product_id.into();
        if product_id.is_empty() {
            return Err(DomainError::EmptyIdentifier("product_id"));
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity += quantity,
            None => self
                .items
                .push(CartItem::new(product_id, product_name, price_snapshot, quantity)),
        }
        Ok(())
    }

    /// Removes a quantity of a product from the cart.
    ///
    /// Decrements the quantity; if the result would be zero or less the item
    /// is removed entirely. Removing more than is present fully removes the
    /// item, never leaves a negative quantity. Absent products are a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId, quantity: u32) {
        if let Some(pos) = self.items.iter().position(|i| &i.product_id == product_id) {
            if self.items[pos].quantity > quantity {
                self.items[pos].quantity -= quantity;
            } else {
                self.items.remove(pos);
            }
        }
    }
}
