//! Cart total calculation.

use common::Money;
use domain::ShoppingCart;
use rust_decimal::Decimal;

/// Sales tax rate applied to every checkout total (8%).
///
/// A fixed constant of this core, not configuration.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Returns the untaxed sum of the cart's line totals.
pub fn subtotal(cart: &ShoppingCart) -> Money {
    cart.items().iter().map(|item| item.line_total()).sum()
}

/// Returns the taxed total for a cart.
///
/// `subtotal × (1 + TAX_RATE)`, computed over exact decimals with no
/// intermediate rounding. An absent cart contributes a zero subtotal.
pub fn cart_total(cart: Option<&ShoppingCart>) -> Money {
    let subtotal = cart.map(subtotal).unwrap_or_else(Money::zero);
    subtotal.scale(Decimal::ONE + TAX_RATE)
}
