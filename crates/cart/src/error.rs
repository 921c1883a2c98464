//! Error types for the cart state container.

use std::path::PathBuf;

use thiserror::Error;

use go_marketplace_core::UnknownProduct;

/// Errors that can occur in the device storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The data directory for the database file could not be created.
    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors that can occur during cart store operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Device storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The persisted cart snapshot could not be deserialized.
    ///
    /// The in-memory cart is left untouched; `clear()` discards the bad
    /// snapshot and recovers.
    #[error("persisted cart snapshot is corrupted: {0}")]
    Corrupted(String),

    /// The cart could not be serialized for persistence.
    #[error("failed to serialize cart snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Increment/decrement referenced a product with no line in the cart.
    #[error(transparent)]
    UnknownProduct(#[from] UnknownProduct),
}
