//! Credential repository trait.
//!
//! Defines the interface for persisting the token and user record between
//! runs, decoupling the session store from the specific storage mechanism
//! (JSON file, keychain, ...).

use async_trait::async_trait;

use super::model::StoredCredentials;
use crate::error::Result;

/// An abstract repository for persisted credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Loads the persisted credentials.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(credentials))`: credentials present
    /// - `Ok(None)`: nothing persisted
    /// - `Err(_)`: storage failed or the record is corrupt
    async fn load(&self) -> Result<Option<StoredCredentials>>;

    /// Saves the credentials, replacing any existing record.
    async fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Removes the persisted credentials (no-op when nothing is stored).
    async fn clear(&self) -> Result<()>;
}
