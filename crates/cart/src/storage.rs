//! Device-local key-value storage backing the cart.
//!
//! # Database: `cart.db` (SQLite)
//!
//! One table, one job: whole textual snapshots stored under string keys.
//!
//! ## Tables
//!
//! - `kv` - `key TEXT PRIMARY KEY, value TEXT NOT NULL`
//!
//! The schema is created idempotently at open; there is no migration
//! machinery. Values are opaque to this layer - the cart store above decides
//! what goes into them. A single-connection pool keeps writes strictly
//! ordered at the database.

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::StorageError;

/// Key-value storage in a device-local SQLite database.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DeviceStorage {
    pool: SqlitePool,
}

impl DeviceStorage {
    /// Open (creating if missing) the database file at `path`.
    ///
    /// The parent directory is created if it does not exist. The database
    /// uses WAL journaling and a single-connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CreateDir`] if the parent directory cannot be
    /// created, or [`StorageError::Database`] if the database cannot be
    /// opened or its schema cannot be initialized.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::init_schema(&pool).await?;
        tracing::debug!(path = %path.display(), "opened device storage");
        Ok(Self { pool })
    }

    /// Open an ephemeral in-memory database (tests, throwaway carts).
    ///
    /// The pool is pinned to one connection that never expires - an
    /// in-memory SQLite database lives exactly as long as its connection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the database cannot be opened.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
        sqlx::query("CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)")
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Get the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the query fails.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the query fails.
    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value)
            VALUES (?1, ?2)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete `key` and its value. Deleting an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the query fails.
    pub async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get_returns_value() {
        let storage = DeviceStorage::in_memory().await.unwrap();

        storage.set_item("k", "v").await.unwrap();

        assert_eq!(storage.get_item("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_get_absent_key_returns_none() {
        let storage = DeviceStorage::in_memory().await.unwrap();

        assert_eq!(storage.get_item("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_value() {
        let storage = DeviceStorage::in_memory().await.unwrap();

        storage.set_item("k", "first").await.unwrap();
        storage.set_item("k", "second").await.unwrap();

        assert_eq!(
            storage.get_item("k").await.unwrap(),
            Some("second".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_item_deletes_key() {
        let storage = DeviceStorage::in_memory().await.unwrap();

        storage.set_item("k", "v").await.unwrap();
        storage.remove_item("k").await.unwrap();

        assert_eq!(storage.get_item("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_noop() {
        let storage = DeviceStorage::in_memory().await.unwrap();

        storage.remove_item("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_open_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("cart.db");

        let storage = DeviceStorage::open(&path).await.unwrap();
        storage.set_item("k", "v").await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.db");

        {
            let storage = DeviceStorage::open(&path).await.unwrap();
            storage.set_item("k", "persisted").await.unwrap();
        }

        let reopened = DeviceStorage::open(&path).await.unwrap();
        assert_eq!(
            reopened.get_item("k").await.unwrap(),
            Some("persisted".to_string())
        );
    }
}
