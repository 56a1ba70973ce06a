//! Product catalog entry.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// An inventory record for a sellable product.
///
/// The stock level is the only mutable field and is only changed through
/// [`Product::update_stock_level`], which rejects negative values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// The product identifier (SKU).
    pub id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Current unit price. Carts capture a snapshot of this at add time.
    pub unit_price: Money,

    /// Count of units available for sale.
    stock_level: u32,

    /// Reference to the product image (URL or asset key).
    pub image_url: String,
}

impl Product {
    /// Creates a new product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        stock_level: u32,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            stock_level,
            image_url: image_url.into(),
        }
    }

    /// Returns the current stock level.
    pub fn stock_level(&self) -> u32 {
        self.stock_level
    }

    /// Returns true if the requested quantity can be satisfied from stock.
    pub fn has_stock_for(&self, quantity: u32) -> bool {
        quantity <= self.stock_level
    }

    /// Sets the stock level.
    ///
    /// Takes a signed value so that callers passing through untrusted input
    /// hit the negative-value check here rather than wrapping silently.
    pub fn update_stock_level(&mut self, new_level: i64) -> Result<(), DomainError> {
        if new_level < 0 {
            return Err(DomainError::NegativeStockLevel(new_level));
        }
        let level =
            u32::try_from(new_level).map_err(|_| DomainError::StockLevelTooLarge(new_level))?;
        self.stock_level = level;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new(
            "SKU-001",
            "Widget",
            Money::from_minor(1000),
            5,
            "https://cdn.example.com/widget.png",
        )
    }

    #[test]
    fn update_stock_level_sets_value() {
        let mut product = widget();
        product.update_stock_level(12).unwrap();
        assert_eq!(product.stock_level(), 12);
    }

    #[test]
    fn update_stock_level_rejects_negative() {
        let mut product = widget();
        let err = product.update_stock_level(-1).unwrap_err();
        assert_eq!(err, DomainError::NegativeStockLevel(-1));
        assert_eq!(product.stock_level(), 5);
    }

    #[test]
    fn update_stock_level_allows_zero() {
        let mut product = widget();
        product.update_stock_level(0).unwrap();
        assert_eq!(product.stock_level(), 0);
    }

    #[test]
    fn has_stock_for_boundary() {
        let product = widget();
        assert!(product.has_stock_for(5));
        assert!(!product.has_stock_for(6));
    }
}
