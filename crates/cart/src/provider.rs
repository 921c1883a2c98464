//! Provider/accessor surface consumed by embedding UI code.
//!
//! A [`CartProvider`] owns a loaded [`CartStore`] and installs it in a tokio
//! task-local for the duration of a scoped future. Inside that scope any code
//! can call [`use_cart`] to obtain the store without threading it through
//! every call; outside a scope the accessor fails with a fixed message.

use std::future::Future;

use thiserror::Error;

use crate::config::CartConfig;
use crate::error::CartError;
use crate::storage::DeviceStorage;
use crate::store::CartStore;

tokio::task_local! {
    /// Store installed by the enclosing provider scope.
    static CURRENT_CART: CartStore;
}

/// Error returned by [`use_cart`] outside a provider scope.
///
/// The message text is stable API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("use_cart must be used within a CartProvider")]
pub struct OutsideCartProvider;

/// Owns a loaded [`CartStore`] and scopes access to it.
pub struct CartProvider {
    store: CartStore,
}

impl CartProvider {
    /// Open device storage per `config`, build the store, and load the
    /// persisted cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the database cannot be opened or
    /// read, or [`CartError::Corrupted`] if the persisted snapshot does not
    /// parse.
    pub async fn open(config: &CartConfig) -> Result<Self, CartError> {
        let storage = DeviceStorage::open(config.database_path()).await?;
        Self::with_store(CartStore::new(storage)).await
    }

    /// Wrap a pre-built store (e.g. over in-memory storage) and load the
    /// persisted cart snapshot.
    ///
    /// # Errors
    ///
    /// Same as [`CartProvider::open`], minus opening the database.
    pub async fn with_store(store: CartStore) -> Result<Self, CartError> {
        store.load().await?;
        Ok(Self { store })
    }

    /// Run a future with this provider's store installed.
    ///
    /// [`use_cart`] resolves anywhere inside `fut`, including in functions
    /// it calls and futures it awaits.
    pub async fn scope<F>(&self, fut: F) -> F::Output
    where
        F: Future,
    {
        CURRENT_CART.scope(self.store.clone(), fut).await
    }

    /// The provider's store, for callers outside any scope (CLI, tests).
    #[must_use]
    pub fn store(&self) -> CartStore {
        self.store.clone()
    }
}

/// Access the cart store installed by the enclosing [`CartProvider::scope`].
///
/// # Errors
///
/// Returns [`OutsideCartProvider`] when no provider scope encloses the
/// caller.
pub fn use_cart() -> Result<CartStore, OutsideCartProvider> {
    CURRENT_CART
        .try_with(CartStore::clone)
        .map_err(|_| OutsideCartProvider)
}
