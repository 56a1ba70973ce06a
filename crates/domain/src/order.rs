//! Order aggregate and its status state machine.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::error::DomainError;

/// The status of an order.
///
/// Transitions:
/// ```text
/// Pending ──┬──► Paid
///           └──► PaymentFailed
/// ```
///
/// `Pending` is the only initial status; `Paid` and `PaymentFailed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order created, payment outcome not yet known.
    #[default]
    Pending,

    /// Payment succeeded (terminal).
    Paid,

    /// Payment was declined (terminal).
    PaymentFailed,
}

impl OrderStatus {
    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::PaymentFailed)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
            OrderStatus::PaymentFailed => "PaymentFailed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A frozen line item in an order.
///
/// Structurally identical to a cart item, but never mutated once the order
/// exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product identifier.
    pub product_id: ProductId,

    /// Human-readable product name.
    pub product_name: String,

    /// Price per unit captured when the item entered the cart.
    pub price_snapshot: Money,

    /// Quantity ordered.
    pub quantity: u32,
}

impl OrderItem {
    /// Creates a new order item.
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
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            product_name: item.product_name.clone(),
            price_snapshot: item.price_snapshot,
            quantity: item.quantity,
        }
    }
}

/// An order created from a cart at checkout.
///
/// Items and total are fixed at creation; the status is the only field that
/// changes afterwards, and only along the transitions documented on
/// [`OrderStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The order identifier.
    pub id: OrderId,

    /// The user the order belongs to.
    pub user_id: UserId,

    items: Vec<OrderItem>,
    total: Money,
    created_at: DateTime<Utc>,
    status: OrderStatus,
}

impl Order {
    /// Creates a new `Pending` order.
    ///
    /// The total is computed by the caller (tax included) and never
    /// recomputed here.
    pub fn new(user_id: UserId, items: Vec<OrderItem>, total: Money) -> Self {
        Self {
            id: OrderId::new(),
            user_id,
            items,
            total,
            created_at: Utc::now(),
            status: OrderStatus::Pending,
        }
    }

    /// Returns the order items.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the order total, tax included.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Marks the order as paid.
    ///
    /// Only valid from `Pending`.
    pub fn mark_paid(&mut self) -> Result<(), DomainError> {
        self.transition(OrderStatus::Paid)
    }

    /// Marks the order's payment as failed.
    ///
    /// Only valid from `Pending`.
    pub fn mark_payment_failed(&mut self) -> Result<(), DomainError> {
        self.transition(OrderStatus::PaymentFailed)
    }

    fn transition(&mut self, to: OrderStatus) -> Result<(), DomainError> {
        if self.status != OrderStatus::Pending {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
