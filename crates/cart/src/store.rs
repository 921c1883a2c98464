//! The stateful cart store binding the in-memory cart to device storage.
//!
//! The store loads the persisted snapshot once at start, applies mutations to
//! the in-memory cart, and rewrites the whole snapshot after every mutation.
//! Memory is the source of truth; storage is a mirror of it.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::instrument;

use go_marketplace_core::{Cart, Product, ProductId};

use crate::CART_STORAGE_KEY;
use crate::error::CartError;
use crate::storage::DeviceStorage;

/// Stateful cart bound to device storage.
///
/// Cheap to clone; clones share one in-memory cart and one storage handle.
/// Every mutation holds the write lock across both the in-memory update and
/// the storage write, so overlapping mutations serialize and no stale
/// snapshot can be written (see the crate docs for the full model).
#[derive(Debug, Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

#[derive(Debug)]
struct CartStoreInner {
    storage: DeviceStorage,
    cart: RwLock<Cart>,
}

impl CartStore {
    /// Create a store over the given device storage, starting empty.
    ///
    /// Call [`CartStore::load`] to pull the persisted snapshot in before
    /// serving reads.
    #[must_use]
    pub fn new(storage: DeviceStorage) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                cart: RwLock::new(Cart::new()),
            }),
        }
    }

    /// Load the persisted cart snapshot into memory.
    ///
    /// An absent key is a no-op success: the empty cart stands. Loaded
    /// snapshots are sanitized; lines violating the cart invariants
    /// (zero quantity, duplicate id) are dropped with a warning. Returns
    /// the cart as loaded.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the read fails, or
    /// [`CartError::Corrupted`] if the blob does not parse. The in-memory
    /// cart is left untouched in both cases; [`CartStore::clear`] discards
    /// a corrupted snapshot.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Cart, CartError> {
        let mut cart = self.inner.cart.write().await;

        let Some(blob) = self.inner.storage.get_item(CART_STORAGE_KEY).await? else {
            tracing::debug!("no persisted cart, starting empty");
            return Ok(cart.clone());
        };

        let mut loaded: Cart =
            serde_json::from_str(&blob).map_err(|e| CartError::Corrupted(e.to_string()))?;
        let dropped = loaded.sanitize();
        if dropped > 0 {
            tracing::warn!(dropped, "dropped invalid lines from persisted cart");
        }
        tracing::debug!(lines = loaded.len(), "loaded persisted cart");

        *cart = loaded.clone();
        Ok(loaded)
    }

    /// Add a product to the cart and persist the result.
    ///
    /// Adding a product that already has a line increments that line instead
    /// of duplicating it. The snapshot written always reflects the mutation
    /// just applied. Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting fails. The in-memory
    /// mutation is kept; the mirror reconverges on the next successful
    /// persist.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(&self, product: Product) -> Result<Cart, CartError> {
        let mut cart = self.inner.cart.write().await;
        let quantity = cart.add(product);
        tracing::debug!(quantity, "added product to cart");
        self.persist(&cart).await?;
        Ok(cart.clone())
    }

    /// Increase the quantity of an existing line by 1 and persist.
    ///
    /// Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownProduct`] if no line with this id is in
    /// the cart (memory and storage are left untouched), or
    /// [`CartError::Storage`] if persisting fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn increment(&self, id: &ProductId) -> Result<Cart, CartError> {
        let mut cart = self.inner.cart.write().await;
        let quantity = cart.increment(id)?;
        tracing::debug!(quantity, "incremented cart line");
        self.persist(&cart).await?;
        Ok(cart.clone())
    }

    /// Decrease the quantity of an existing line by 1 and persist.
    ///
    /// A line reaching quantity 0 is removed from the cart entirely.
    /// Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownProduct`] if no line with this id is in
    /// the cart (memory and storage are left untouched), or
    /// [`CartError::Storage`] if persisting fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn decrement(&self, id: &ProductId) -> Result<Cart, CartError> {
        let mut cart = self.inner.cart.write().await;
        match cart.decrement(id)? {
            Some(quantity) => tracing::debug!(quantity, "decremented cart line"),
            None => tracing::debug!("removed cart line"),
        }
        self.persist(&cart).await?;
        Ok(cart.clone())
    }

    /// Clone of the current in-memory cart.
    pub async fn cart(&self) -> Cart {
        self.inner.cart.read().await.clone()
    }

    /// Empty the in-memory cart and remove the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if removing the key fails; the
    /// in-memory cart is emptied regardless.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        let mut cart = self.inner.cart.write().await;
        *cart = Cart::new();
        self.inner.storage.remove_item(CART_STORAGE_KEY).await?;
        tracing::debug!("cleared cart");
        Ok(())
    }

    /// Rewrite the whole persisted snapshot from the given cart.
    ///
    /// Callers hold the write lock, so snapshots reach storage in mutation
    /// order.
    async fn persist(&self, cart: &Cart) -> Result<(), CartError> {
        let blob = serde_json::to_string(cart)?;
        self.inner.storage.set_item(CART_STORAGE_KEY, &blob).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(
            id,
            format!("Product {id}"),
            format!("https://img/{id}.jpg"),
            Decimal::new(cents, 2),
        )
    }

    async fn in_memory_store() -> (CartStore, DeviceStorage) {
        let storage = DeviceStorage::in_memory().await.unwrap();
        (CartStore::new(storage.clone()), storage)
    }

    async fn persisted_cart(storage: &DeviceStorage) -> Cart {
        let blob = storage.get_item(CART_STORAGE_KEY).await.unwrap().unwrap();
        serde_json::from_str(&blob).unwrap()
    }

    #[tokio::test]
    async fn test_add_to_cart_creates_line_with_quantity_one() {
        let (store, _) = in_memory_store().await;

        let cart = store.add_to_cart(product("p-1", 1099)).await.unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&ProductId::new("p-1")).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_add_to_cart_persists_post_update_snapshot() {
        let (store, storage) = in_memory_store().await;

        store.add_to_cart(product("p-1", 1099)).await.unwrap();

        // The blob written by the mutation already contains the new line.
        let persisted = persisted_cart(&storage).await;
        assert_eq!(persisted, store.cart().await);
        assert!(persisted.contains(&ProductId::new("p-1")));
    }

    #[tokio::test]
    async fn test_add_to_cart_twice_increments_single_line() {
        let (store, storage) = in_memory_store().await;

        store.add_to_cart(product("p-1", 1099)).await.unwrap();
        let cart = store.add_to_cart(product("p-1", 1099)).await.unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&ProductId::new("p-1")).unwrap().quantity, 2);
        assert_eq!(persisted_cart(&storage).await, cart);
    }

    #[tokio::test]
    async fn test_increment_unknown_id_leaves_memory_and_storage_untouched() {
        let (store, storage) = in_memory_store().await;
        store.add_to_cart(product("p-1", 1099)).await.unwrap();
        let before = persisted_cart(&storage).await;

        let err = store.increment(&ProductId::new("missing")).await.unwrap_err();

        assert!(matches!(err, CartError::UnknownProduct(_)));
        assert_eq!(store.cart().await, before);
        assert_eq!(persisted_cart(&storage).await, before);
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes_line_and_persists_empty_cart() {
        let (store, storage) = in_memory_store().await;
        store.add_to_cart(product("p-1", 1099)).await.unwrap();

        let cart = store.decrement(&ProductId::new("p-1")).await.unwrap();

        assert!(cart.is_empty());
        let blob = storage.get_item(CART_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(blob, "[]");
    }

    #[tokio::test]
    async fn test_decrement_unknown_id_is_reported() {
        let (store, _) = in_memory_store().await;

        let err = store.decrement(&ProductId::new("missing")).await.unwrap_err();

        assert!(matches!(err, CartError::UnknownProduct(_)));
    }

    #[tokio::test]
    async fn test_load_restores_snapshot_written_by_another_store() {
        let (writer, storage) = in_memory_store().await;
        writer.add_to_cart(product("p-1", 1099)).await.unwrap();
        writer.add_to_cart(product("p-2", 550)).await.unwrap();

        let reader = CartStore::new(storage);
        let loaded = reader.load().await.unwrap();

        assert_eq!(loaded, writer.cart().await);
    }

    #[tokio::test]
    async fn test_load_with_absent_key_keeps_empty_cart() {
        let (store, _) = in_memory_store().await;

        let loaded = store.load().await.unwrap();

        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupted_blob_is_reported_and_memory_untouched() {
        let (store, storage) = in_memory_store().await;
        storage.set_item(CART_STORAGE_KEY, "{not json").await.unwrap();

        let err = store.load().await.unwrap_err();

        assert!(matches!(err, CartError::Corrupted(_)));
        assert!(store.cart().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_sanitizes_invalid_snapshot_lines() {
        let (store, storage) = in_memory_store().await;
        // Zero-quantity line plus a duplicate id, as an older writer could
        // have left behind.
        let blob = r#"[
            {"id":"p-1","title":"A","image_url":"https://img/a.jpg","price":"1.00","quantity":0},
            {"id":"p-2","title":"B","image_url":"https://img/b.jpg","price":"2.00","quantity":3},
            {"id":"p-2","title":"B","image_url":"https://img/b.jpg","price":"2.00","quantity":9}
        ]"#;
        storage.set_item(CART_STORAGE_KEY, blob).await.unwrap();

        let loaded = store.load().await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.line(&ProductId::new("p-2")).unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_clear_empties_cart_and_removes_key() {
        let (store, storage) = in_memory_store().await;
        store.add_to_cart(product("p-1", 1099)).await.unwrap();

        store.clear().await.unwrap();

        assert!(store.cart().await.is_empty());
        assert_eq!(storage.get_item(CART_STORAGE_KEY).await.unwrap(), None);
    }
}
