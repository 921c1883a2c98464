//! Cart storage configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GOMARKETPLACE_DATA_DIR` - Directory holding the cart database
//!   (default: platform data directory joined with `go-marketplace`)

use std::path::PathBuf;

use thiserror::Error;

/// File name of the cart database inside the data directory.
const DATABASE_FILE: &str = "cart.db";

/// Application directory under the platform data directory.
const APP_DIR: &str = "go-marketplace";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no platform data directory available; set GOMARKETPLACE_DATA_DIR")]
    NoDataDir,
}

/// Cart storage configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory holding the cart database file.
    pub data_dir: PathBuf,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    /// `GOMARKETPLACE_DATA_DIR` overrides the data directory; otherwise the
    /// platform data directory (e.g. `~/.local/share` on Linux) joined with
    /// `go-marketplace` is used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] if no override is set and the
    /// platform provides no data directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        if let Some(dir) = get_optional_env("GOMARKETPLACE_DATA_DIR") {
            return Ok(Self {
                data_dir: PathBuf::from(dir),
            });
        }

        let base = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
        Ok(Self {
            data_dir: base.join(APP_DIR),
        })
    }

    /// Configuration rooted at an explicit directory (tests and tooling).
    #[must_use]
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
        }
    }

    /// Full path of the cart database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_is_under_data_dir() {
        let config = CartConfig::with_data_dir("/tmp/gm-test");
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/gm-test/cart.db")
        );
    }

    #[test]
    fn test_with_data_dir_keeps_directory_verbatim() {
        let config = CartConfig::with_data_dir(PathBuf::from("relative/dir"));
        assert_eq!(config.data_dir, PathBuf::from("relative/dir"));
    }
}
