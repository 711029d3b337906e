//! Application bootstrap.
//!
//! Wires configuration, the shared token cell, the HTTP adapter, the
//! resource clients and the stores into one [`App`] value, and subscribes
//! the session store to the transport's auth signals.

use std::sync::Arc;

use tokio::task::JoinHandle;

use clou_client::{AuthClient, DiaryClient, EmotionClient, HttpClient, MovieClient};
use clou_core::auth::{CredentialRepository, TokenCell};
use clou_core::config::ClientConfig;
use clou_core::error::Result;
use clou_infrastructure::{ConfigStorage, CredentialStorage};

use crate::diary_store::DiaryStore;
use crate::emotion_store::EmotionStore;
use crate::movie_store::MovieStore;
use crate::session_store::SessionStore;

/// The assembled client application: one store per domain, sharing one
/// transport.
pub struct App {
    pub session: SessionStore,
    pub movies: MovieStore,
    pub emotions: EmotionStore,
    pub diary: DiaryStore,
    auth_listener: JoinHandle<()>,
}

impl App {
    /// Builds the full store graph over one transport.
    ///
    /// Must be called within a Tokio runtime: the session store spawns its
    /// auth-signal listener here.
    pub fn build(config: &ClientConfig, credentials: Arc<dyn CredentialRepository>) -> Self {
        let token = TokenCell::new();
        let http = HttpClient::new(config, token.clone());

        let session = SessionStore::new(
            Arc::new(AuthClient::new(http.clone())),
            credentials,
            token,
        );
        let auth_listener = session.listen_for_auth_signals(http.subscribe_auth_signals());

        Self {
            session,
            movies: MovieStore::new(Arc::new(MovieClient::new(http.clone()))),
            emotions: EmotionStore::new(Arc::new(EmotionClient::new(http.clone()))),
            diary: DiaryStore::new(Arc::new(DiaryClient::new(http))),
            auth_listener,
        }
    }

    /// Builds the app from the files under `~/.config/clou/`.
    pub fn from_default_paths() -> Result<Self> {
        let config = ConfigStorage::new()?.load()?;
        let credentials =
            CredentialStorage::new().map_err(clou_core::ClouError::from)?;
        Ok(Self::build(&config, Arc::new(credentials)))
    }

    /// Startup hook: restores a persisted session, fail-closed.
    pub async fn init(&self) -> Result<()> {
        self.session.init_auth().await
    }

    /// Teardown hook: stops the auth-signal listener.
    pub fn shutdown(&self) {
        self.auth_listener.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_starts_anonymous() {
        let temp_dir = TempDir::new().unwrap();
        let credentials =
            CredentialStorage::with_path(temp_dir.path().join("credentials.json"));
        let app = App::build(&ClientConfig::default(), Arc::new(credentials));

        app.init().await.unwrap();
        assert!(!app.session.is_authenticated());
        app.shutdown();
    }
}
