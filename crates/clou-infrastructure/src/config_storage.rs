//! Transport configuration file storage.
//!
//! Loads `~/.config/clou/config.toml` into a [`ClientConfig`]. A missing
//! file is not an error: the defaults cover local development.

use std::fs;
use std::path::PathBuf;

use clou_core::config::ClientConfig;
use clou_core::error::{ClouError, Result};

use crate::paths::ClouPaths;

/// Storage for the transport configuration file (config.toml).
///
/// Read-only: the file is hand-edited, never written by the client.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a new ConfigStorage with the default path
    /// (~/.config/clou/config.toml).
    pub fn new() -> Result<Self> {
        let path = ClouPaths::config_file()
            .map_err(|e| ClouError::storage(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a new ConfigStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration, falling back to defaults when the file does
    /// not exist.
    ///
    /// # Returns
    ///
    /// - `Ok(ClientConfig)`: parsed file, or defaults when missing
    /// - `Err(_)`: file exists but could not be read or parsed
    pub fn load(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(ClientConfig::default());
        }
        let content = fs::read_to_string(&self.path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("config.toml"));
        let config = storage.load().unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_load_valid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.toml");
        fs::write(&file_path, "base_url = \"http://api:9000\"\ntimeout_secs = 5\n").unwrap();

        let storage = ConfigStorage::with_path(file_path);
        let config = storage.load().unwrap();
        assert_eq!(config.base_url, "http://api:9000");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.toml");
        fs::write(&file_path, "base_url = [broken").unwrap();

        let storage = ConfigStorage::with_path(file_path);
        assert!(storage.load().is_err());
    }
}
