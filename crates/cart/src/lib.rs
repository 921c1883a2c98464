//! Cart state container for the GoMarketplace storefront.
//!
//! Holds the in-memory cart, mirrors it wholesale to a single key in
//! device-local SQLite storage after every mutation, and exposes the
//! provider/accessor surface embedding UI code consumes:
//!
//! ```no_run
//! use go_marketplace_cart::{CartConfig, CartProvider, use_cart};
//! use go_marketplace_core::Product;
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CartConfig::from_env()?;
//! let provider = CartProvider::open(&config).await?;
//! provider
//!     .scope(async {
//!         let store = use_cart()?;
//!         store
//!             .add_to_cart(Product::new(
//!                 "p-1",
//!                 "Hat",
//!                 "https://img/hat.jpg",
//!                 Decimal::new(1099, 2),
//!             ))
//!             .await?;
//!         Ok::<_, Box<dyn std::error::Error>>(())
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod provider;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, StorageError};
pub use provider::{CartProvider, OutsideCartProvider, use_cart};
pub use storage::DeviceStorage;
pub use store::CartStore;

/// Storage key holding the serialized cart snapshot.
///
/// The `@goMarketplace:` prefix namespaces the key within the shared
/// device-local store.
pub const CART_STORAGE_KEY: &str = "@goMarketplace:products";
