//! Integration tests for the GoMarketplace cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! Tests run against real SQLite database files in per-test temporary
//! directories; nothing touches the developer's own cart database.
//!
//! # Test Categories
//!
//! - `cart_operations` - add/increment/decrement through the provider surface
//! - `cart_persistence` - snapshots on disk, reload, corruption, sanitizing
//! - `cart_concurrency` - overlapping mutations through store clones
//! - `cart_provider` - `use_cart` inside and outside a provider scope

use std::path::PathBuf;

use rust_decimal::Decimal;
use tempfile::TempDir;

use go_marketplace_cart::{CartProvider, CartStore, DeviceStorage};
use go_marketplace_core::Product;

/// A cart database in its own temporary directory.
///
/// The directory lives as long as this value; dropping it deletes the
/// database file.
pub struct TestCart {
    _dir: TempDir,
    /// Storage handle over the test database, for raw key-value access.
    pub storage: DeviceStorage,
    /// Path of the database file, for reopening.
    pub path: PathBuf,
}

impl TestCart {
    /// Create a fresh cart database in a new temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or the database cannot be created;
    /// tests cannot proceed without either.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("cart.db");
        let storage = DeviceStorage::open(&path)
            .await
            .expect("open device storage");
        Self {
            _dir: dir,
            storage,
            path,
        }
    }

    /// A loaded store over this test database.
    ///
    /// # Panics
    ///
    /// Panics if the persisted snapshot cannot be loaded.
    pub async fn store(&self) -> CartStore {
        let store = CartStore::new(self.storage.clone());
        store.load().await.expect("load cart");
        store
    }

    /// A provider wrapping a loaded store over this test database.
    ///
    /// # Panics
    ///
    /// Panics if the persisted snapshot cannot be loaded.
    pub async fn provider(&self) -> CartProvider {
        CartProvider::with_store(CartStore::new(self.storage.clone()))
            .await
            .expect("load cart")
    }

    /// Reopen the database file with a fresh connection pool, as a process
    /// restart would.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be reopened.
    pub async fn reopen(&self) -> DeviceStorage {
        DeviceStorage::open(&self.path)
            .await
            .expect("reopen device storage")
    }
}

/// A test product with a deterministic title and image URL.
#[must_use]
pub fn product(id: &str, cents: i64) -> Product {
    Product::new(
        id,
        format!("Product {id}"),
        format!("https://img.example/{id}.jpg"),
        Decimal::new(cents, 2),
    )
}
