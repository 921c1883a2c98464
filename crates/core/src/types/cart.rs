//! The cart collection and its pure mutation logic.
//!
//! A [`Cart`] is an ordered collection of [`CartLine`]s with at most one
//! line per [`ProductId`]. All mutation logic lives here, on the collection,
//! so the cart semantics are testable without any storage attached. The
//! stateful wrapper in the `cart` crate applies these mutations and mirrors
//! the result to device storage.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::product::Product;

/// Error returned when increment/decrement references a product that has no
/// line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("product {0} is not in the cart")]
pub struct UnknownProduct(pub ProductId);

/// One product entry in the cart, with its quantity.
///
/// Lines are flat (the product fields are inlined) because the persisted
/// snapshot is a plain JSON array of these objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog identifier of the product.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Reference to the product image.
    pub image_url: String,
    /// Unit price.
    pub price: Decimal,
    /// Number of units, always >= 1 for a line held in a cart.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl From<Product> for CartLine {
    /// A freshly added product enters the cart with quantity 1.
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }
}

/// The ordered collection of line items for the current shopping session.
///
/// Invariants:
/// - at most one line per [`ProductId`];
/// - every line has `quantity >= 1` (a line decremented to 0 is removed);
/// - insertion order is preserved.
///
/// Serializes transparently as a bare JSON array of lines; that array is the
/// persisted snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines currently in the cart, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the line for a product, if present.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Whether the cart holds a line for this product.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.line(id).is_some()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Add a product to the cart.
    ///
    /// If a line with the same id already exists this behaves exactly as
    /// [`Cart::increment`] for that id; otherwise a new line with quantity 1
    /// is appended. Returns the resulting quantity of the product's line.
    pub fn add(&mut self, product: Product) -> u32 {
        if let Ok(quantity) = self.increment(&product.id) {
            return quantity;
        }
        self.lines.push(CartLine::from(product));
        1
    }

    /// Increase the quantity of an existing line by 1.
    ///
    /// Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownProduct`] if no line with this id is in the cart.
    pub fn increment(&mut self, id: &ProductId) -> Result<u32, UnknownProduct> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| UnknownProduct(id.clone()))?;
        line.quantity = line.quantity.saturating_add(1);
        Ok(line.quantity)
    }

    /// Decrease the quantity of an existing line by 1.
    ///
    /// A line reaching quantity 0 is removed from the cart entirely, never
    /// retained at zero. Returns the remaining quantity, or `None` if the
    /// line was removed.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownProduct`] if no line with this id is in the cart.
    pub fn decrement(&mut self, id: &ProductId) -> Result<Option<u32>, UnknownProduct> {
        let remaining = {
            let line = self
                .lines
                .iter_mut()
                .find(|l| &l.id == id)
                .ok_or_else(|| UnknownProduct(id.clone()))?;
            line.quantity = line.quantity.saturating_sub(1);
            line.quantity
        };

        if remaining == 0 {
            self.lines.retain(|l| &l.id != id);
            return Ok(None);
        }
        Ok(Some(remaining))
    }

    /// Drop lines that violate the cart invariants.
    ///
    /// Removes zero-quantity lines and duplicate ids (the first occurrence
    /// wins). Snapshots read back from storage pass through here so a blob
    /// written by an older or buggy writer cannot install an invalid
    /// in-memory state. Returns the number of lines dropped.
    pub fn sanitize(&mut self) -> usize {
        let before = self.lines.len();
        let mut seen = HashSet::new();
        self.lines
            .retain(|l| l.quantity >= 1 && seen.insert(l.id.clone()));
        before - self.lines.len()
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }
}
