//! Shared types for the order-fulfillment core.
//!
//! Typed identifiers keep user, order, and product ids from being mixed up
//! at call sites; [`Money`] provides exact decimal arithmetic for prices.

pub mod ids;
pub mod money;

pub use ids::{OrderId, ProductId, UserId};
pub use money::Money;
