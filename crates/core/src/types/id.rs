//! Newtype identifier for type-safe product references.
//!
//! Product identifiers come from the catalog as opaque strings, so the
//! wrapper holds a `String` rather than a numeric id. The newtype prevents
//! accidentally passing an arbitrary string (a title, an image URL) where a
//! product identifier is expected.

use serde::{Deserialize, Serialize};

/// Identifier of a product, unique per catalog entry.
///
/// Serializes transparently as the underlying string, so persisted cart
/// snapshots carry plain string ids.
///
/// # Example
///
/// ```rust
/// use go_marketplace_core::ProductId;
///
/// let id = ProductId::new("bread-001");
/// assert_eq!(id.as_str(), "bread-001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}
