//! Checkout orchestration.
//!
//! Converts a cart into an order and coordinates the payment call. Two
//! deliberately preserved behaviors deserve a warning label:
//!
//! - The cart is deleted as soon as the `Pending` order is persisted, before
//!   the payment outcome is known. A failed payment leaves no cart to retry
//!   from; in exchange a double-submitted checkout cannot charge twice.
//! - The stock check at add-to-cart and any later stock decrement are
//!   separate operations with no concurrency guard. Two concurrent checkouts
//!   for the same product can both pass the check.

use common::{ProductId, UserId};
use domain::{Order, OrderItem, ShoppingCart};
use store::{CartStore, OrderStore, ProductStore};

use crate::error::{Result, ServiceError};
use crate::payment::{PaymentGateway, PaymentInstrument, PaymentStatus};
use crate::pricing;

/// Orchestrates cart mutation and the cart-to-order checkout sequence.
pub struct CheckoutService<P, C, O, G>
where
    P: ProductStore,
    C: CartStore,
    O: OrderStore,
    G: PaymentGateway,
{
    products: P,
    carts: C,
    orders: O,
    gateway: G,
}

impl<P, C, O, G> CheckoutService<P, C, O, G>
where
    P: ProductStore,
    C: CartStore,
    O: OrderStore,
    G: PaymentGateway,
{
    /// Creates a new checkout service over the given collaborators.
    pub fn new(products: P, carts: C, orders: O, gateway: G) -> Self {
        Self {
            products,
            carts,
            orders,
            gateway,
        }
    }

    /// Adds a quantity of a product to the user's cart.
    ///
    /// The cart is created lazily if the user has none. Fails with
    /// [`ServiceError::OutOfStock`] before any mutation when the requested
    /// quantity exceeds the product's stock level; the price snapshot is
    /// captured from the catalog at this point.
    #[tracing::instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<ShoppingCart> {
        let product = self
            .products
            .get_by_id(&product_id)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(product_id.clone()))?;

        if !product.has_stock_for(quantity) {
            return Err(ServiceError::OutOfStock {
                product_id,
                requested: quantity,
                available: product.stock_level(),
            });
        }

        let mut cart = self
            .carts
            .get_by_user_id(user_id)
            .await?
            .unwrap_or_else(|| ShoppingCart::new(user_id));
        cart.add_item(product.id, product.name, product.unit_price, quantity)?;
        self.carts.save(cart.clone()).await?;

        tracing::info!(%user_id, items = cart.item_count(), "item added to cart");
        Ok(cart)
    }

    /// Removes a quantity of a product from the user's cart.
    ///
    /// Removing the last item deletes the cart; the result is `None` when no
    /// cart remains. A missing cart is a no-op, not an error.
    #[tracing::instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Option<ShoppingCart>> {
        let Some(mut cart) = self.carts.get_by_user_id(user_id).await? else {
            return Ok(None);
        };

        cart.remove_item(&product_id, quantity);

        if cart.is_empty() {
            self.carts.delete_by_user_id(user_id).await?;
            Ok(None)
        } else {
            self.carts.save(cart.clone()).await?;
            Ok(Some(cart))
        }
    }

    /// Runs the full checkout sequence for a user's cart.
    ///
    /// Steps, each proceeding only if the prior one succeeded:
    /// 1. validate the payment instrument
    /// 2. load the cart; absent or empty fails with [`ServiceError::EmptyCart`]
    /// 3. compute the taxed total from the current cart contents
    /// 4. persist a `Pending` order holding the cart's items and the total
    /// 5. delete the cart (unconditionally, before the payment result)
    /// 6. charge the gateway
    /// 7. `Success` → `Paid`, `Failed` → `PaymentFailed` (both persisted);
    ///    `Pending` → order stays `Pending` with no update call; anything
    ///    else propagates as [`ServiceError::UnexpectedPaymentOutcome`]
    ///
    /// There is no compensation across the cart-delete/payment boundary.
    #[tracing::instrument(skip(self, instrument))]
    pub async fn checkout(
        &self,
        user_id: UserId,
        instrument: &PaymentInstrument,
    ) -> Result<Order> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let started = std::time::Instant::now();

        instrument.validate()?;

        let cart = self
            .carts
            .get_by_user_id(user_id)
            .await?
            .ok_or(ServiceError::EmptyCart)?;
        if cart.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        let total = pricing::cart_total(Some(&cart));
        let items: Vec<OrderItem> = cart.items().iter().map(OrderItem::from).collect();
        let mut order = Order::new(user_id, items, total);
        self.orders.create(order.clone()).await?;

        // The cart is gone from here on, whatever the gateway says.
        self.carts.delete_by_user_id(user_id).await?;

        tracing::info!(order_id = %order.id, %total, "order created, charging gateway");
        let receipt = self.gateway.process_payment(total, instrument).await?;

        match receipt.status {
            PaymentStatus::Success => {
                order.mark_paid()?;
                self.orders.update(&order).await?;
                metrics::counter!("checkout_paid_total").increment(1);
            }
            PaymentStatus::Failed => {
                order.mark_payment_failed()?;
                self.orders.update(&order).await?;
                metrics::counter!("checkout_payment_failed_total").increment(1);
                tracing::warn!(order_id = %order.id, payment_id = %receipt.payment_id, "payment declined");
            }
            PaymentStatus::Pending => {
                // Settlement will arrive out of band; no status change, no
                // persistence call.
                tracing::info!(order_id = %order.id, payment_id = %receipt.payment_id, "payment pending settlement");
            }
            PaymentStatus::Other(status) => {
                tracing::error!(order_id = %order.id, %status, "unexpected payment outcome");
                metrics::histogram!("checkout_duration_seconds")
                    .record(started.elapsed().as_secs_f64());
                return Err(ServiceError::UnexpectedPaymentOutcome(status));
            }
        }

        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());
        tracing::info!(order_id = %order.id, status = %order.status(), "checkout finished");
        Ok(order)
    }
}
