//! Credential file storage.
//!
//! Persists the token and serialized user record as JSON under the user
//! config directory, and implements the [`CredentialRepository`] trait the
//! session store is written against.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use clou_core::auth::{CredentialRepository, StoredCredentials};
use clou_core::error::{ClouError, Result};

use crate::paths::ClouPaths;

/// Errors that can occur during credential storage operations.
#[derive(Debug)]
pub enum CredentialStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for CredentialStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            CredentialStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            CredentialStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine home directory")
            }
        }
    }
}

impl std::error::Error for CredentialStorageError {}

impl From<std::io::Error> for CredentialStorageError {
    fn from(e: std::io::Error) -> Self {
        CredentialStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for CredentialStorageError {
    fn from(e: serde_json::Error) -> Self {
        CredentialStorageError::ParseError(e)
    }
}

impl From<CredentialStorageError> for ClouError {
    fn from(e: CredentialStorageError) -> Self {
        ClouError::storage(e.to_string())
    }
}

/// Storage for the persisted credentials file (credentials.json).
///
/// Responsibilities:
/// - Load credentials.json from ~/.config/clou/
/// - Save/replace the record on login and profile refresh
/// - Remove the file on logout and session teardown
///
/// Does NOT:
/// - Validate the token against the backend
/// - Handle encryption (plaintext JSON storage)
pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    /// Creates a new CredentialStorage with the default path
    /// (~/.config/clou/credentials.json).
    pub fn new() -> std::result::Result<Self, CredentialStorageError> {
        let path = ClouPaths::credentials_file()
            .map_err(|_| CredentialStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a new CredentialStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path to the credentials file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load_sync(&self) -> std::result::Result<Option<StoredCredentials>, CredentialStorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let credentials = serde_json::from_str(&content)?;
        Ok(Some(credentials))
    }

    fn save_sync(
        &self,
        credentials: &StoredCredentials,
    ) -> std::result::Result<(), CredentialStorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(credentials)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear_sync(&self) -> std::result::Result<(), CredentialStorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialRepository for CredentialStorage {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        self.load_sync().map_err(Into::into)
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        self.save_sync(credentials)?;
        tracing::debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.clear_sync()?;
        tracing::debug!(path = %self.path.display(), "credentials cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = CredentialStorage::with_path(temp_dir.path().join("credentials.json"));

        let loaded = storage.load().await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = CredentialStorage::with_path(temp_dir.path().join("credentials.json"));

        let credentials = StoredCredentials::new("tok-abc");
        storage.save(&credentials).await.unwrap();

        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded.token, "tok-abc");
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("credentials.json");
        let storage = CredentialStorage::with_path(file_path.clone());

        storage.save(&StoredCredentials::new("tok")).await.unwrap();
        assert!(file_path.exists());

        storage.clear().await.unwrap();
        assert!(!file_path.exists());
    }

    #[tokio::test]
    async fn test_clear_without_file_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let storage = CredentialStorage::with_path(temp_dir.path().join("credentials.json"));
        assert!(storage.clear().await.is_ok());
    }

    #[tokio::test]
    async fn test_corrupt_file_surfaces_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("credentials.json");
        fs::write(&file_path, "{ not json").unwrap();

        let storage = CredentialStorage::with_path(file_path);
        let result = storage.load().await;
        assert!(matches!(result, Err(ClouError::Storage(_))));
    }
}
