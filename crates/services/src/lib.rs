//! Use-case layer for the order-fulfillment core.
//!
//! This crate wires the domain aggregates to the persistence contracts and
//! the payment gateway:
//! 1. [`CheckoutService`] adds items to carts (with a stock check) and turns
//!    a cart into a paid or failed order
//! 2. [`InventoryManager`] applies administrator-authorized stock updates
//! 3. [`CustomerDataAccess`] gates staff reads of other customers' data
//!
//! Every failure propagates to the caller; nothing is retried or swallowed
//! inside this layer.

pub mod access;
pub mod checkout;
pub mod error;
pub mod inventory;
pub mod payment;
pub mod pricing;

pub use access::CustomerDataAccess;
pub use checkout::CheckoutService;
pub use error::ServiceError;
pub use inventory::InventoryManager;
pub use payment::{
    InMemoryPaymentGateway, PaymentGateway, PaymentInstrument, PaymentReceipt, PaymentStatus,
};
pub use pricing::TAX_RATE;
