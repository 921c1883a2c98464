//! Catalog product data as handed to the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product as offered by the catalog: a cart line without a quantity.
///
/// This is the input to `add_to_cart`; the cart itself assigns the quantity
/// (1 for a new line). Prices use [`Decimal`] for exact money arithmetic and
/// serialize as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier, unique per product.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Reference to the product image.
    pub image_url: String,
    /// Unit price.
    pub price: Decimal,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}
