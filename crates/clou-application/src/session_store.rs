//! Session store.
//!
//! Owns the client-side authentication state: the shared token cell, the
//! current user, the lifecycle phase, and the signup uniqueness probes.
//! All transitions flow through this store; the transport only reports
//! 401s via the auth signal channel, and this store performs the teardown.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;

use clou_core::auth::{
    AuthApi, AuthSignal, CheckField, CredentialRepository, FieldExists, PasswordChange,
    ProfileUpdate, RegistrationForm, SessionPhase, StoredCredentials, TokenCell, UserProfile,
};
use clou_core::error::{ClouError, Result};

/// Mutable session state behind the store's lock.
///
/// The token itself lives in the shared [`TokenCell`] so the transport sees
/// updates without going through this struct.
#[derive(Debug, Clone, Default)]
struct SessionState {
    user: Option<UserProfile>,
    phase: SessionPhase,
    loading: bool,
    error: Option<String>,
    field_exists: FieldExists,
}

/// Read-only view of the session for UIs and the route guard.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub phase: SessionPhase,
    pub loading: bool,
    pub error: Option<String>,
    pub field_exists: FieldExists,
}

impl SessionSnapshot {
    /// Authentication is defined by token presence, nothing else.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Store for authentication state and account actions.
#[derive(Clone)]
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    credentials: Arc<dyn CredentialRepository>,
    token: TokenCell,
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new(
        api: Arc<dyn AuthApi>,
        credentials: Arc<dyn CredentialRepository>,
        token: TokenCell,
    ) -> Self {
        Self {
            api,
            credentials,
            token,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Returns a point-in-time view of the session.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            token: self.token.get(),
            user: state.user.clone(),
            phase: state.phase,
            loading: state.loading,
            error: state.error.clone(),
            field_exists: state.field_exists,
        }
    }

    /// Whether a token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_present()
    }

    /// Clears the last recorded error.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Exchanges credentials for a token, persists it, and triggers a
    /// profile fetch.
    ///
    /// Input validation (non-empty fields) is the caller's responsibility.
    /// Success is decided by the token exchange alone: a failing follow-on
    /// profile fetch is logged (and, on 401, tears the session down) but
    /// does not turn a granted token into a login error. On failure the
    /// session keeps anonymous semantics: no token is held.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            state.phase = SessionPhase::Authenticating;
        }

        match self.api.login(username, password).await {
            Ok(token) => {
                self.token.set(&token);
                if let Err(e) = self
                    .credentials
                    .save(&StoredCredentials::new(&token))
                    .await
                {
                    tracing::warn!("failed to persist credentials: {}", e);
                }
                {
                    let mut state = self.state.write().await;
                    state.phase = SessionPhase::Authenticated;
                    state.loading = false;
                }
                tracing::info!("login succeeded");
                if let Err(e) = self.fetch_user_profile().await {
                    tracing::warn!("profile fetch after login failed: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.phase = SessionPhase::Failed;
                state.loading = false;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Registers a new account.
    ///
    /// Registration is a side action: it never transitions the session into
    /// `Authenticated` and never retains a token, even if the backend's
    /// response carries a token-like field.
    pub async fn register(&self, form: &RegistrationForm) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let had_token = self.token.is_present();
        let result = self.api.signup(form).await;

        if !had_token {
            // Registration must not imply login.
            self.token.clear();
        }

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Logs out.
    ///
    /// The server call is best-effort: local state (token, user, persisted
    /// credentials) is cleared unconditionally, so this always succeeds from
    /// the caller's perspective.
    pub async fn logout(&self) -> Result<()> {
        if self.token.is_present() {
            if let Err(e) = self.api.logout().await {
                tracing::warn!("server-side logout failed, clearing local session anyway: {}", e);
            }
        }
        self.teardown_local().await;
        Ok(())
    }

    /// Fetches the current user's profile and replaces the cached record
    /// wholesale.
    ///
    /// Requires a token. A 401 here means the token is no longer valid and
    /// cascades into a full local logout.
    pub async fn fetch_user_profile(&self) -> Result<UserProfile> {
        let Some(token) = self.token.get() else {
            return Err(ClouError::unauthorized("no session token held"));
        };

        {
            let mut state = self.state.write().await;
            state.loading = true;
        }

        match self.api.fetch_profile().await {
            Ok(profile) => {
                {
                    let mut state = self.state.write().await;
                    state.user = Some(profile.clone());
                    state.loading = false;
                }
                let record = StoredCredentials::new(token).with_user(profile.clone());
                if let Err(e) = self.credentials.save(&record).await {
                    tracing::warn!("failed to persist user record: {}", e);
                }
                Ok(profile)
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("token rejected while fetching profile, clearing session");
                self.teardown_local().await;
                self.state.write().await.error =
                    Some("session expired, please log in again".to_string());
                Err(e)
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Applies a partial profile update and adopts the returned record.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        if !self.token.is_present() {
            return Err(ClouError::unauthorized("no session token held"));
        }
        match self.api.update_profile(update).await {
            Ok(profile) => {
                self.state.write().await.user = Some(profile.clone());
                if let Some(token) = self.token.get() {
                    let record = StoredCredentials::new(token).with_user(profile.clone());
                    if let Err(e) = self.credentials.save(&record).await {
                        tracing::warn!("failed to persist user record: {}", e);
                    }
                }
                Ok(profile)
            }
            Err(e) => {
                self.state.write().await.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Changes the account password.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        if !self.token.is_present() {
            return Err(ClouError::unauthorized("no session token held"));
        }
        match self.api.change_password(change).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state.write().await.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Probes whether a username is already taken.
    pub async fn check_username_exists(&self, value: &str) -> bool {
        self.check_field(CheckField::Username, value).await
    }

    /// Probes whether an email is already taken.
    pub async fn check_email_exists(&self, value: &str) -> bool {
        self.check_field(CheckField::Email, value).await
    }

    /// Probes whether a nickname is already taken.
    pub async fn check_nickname_exists(&self, value: &str) -> bool {
        self.check_field(CheckField::Nickname, value).await
    }

    /// Shared probe logic. A failed probe degrades to `false` ("not known to
    /// exist") instead of surfacing an error: a signup form must not be
    /// blocked by a transient failure. The final signup request still
    /// enforces uniqueness server-side.
    async fn check_field(&self, field: CheckField, value: &str) -> bool {
        let exists = match self.api.check_field_exists(field, value).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(?field, "uniqueness probe failed, treating as available: {}", e);
                false
            }
        };
        let mut state = self.state.write().await;
        match field {
            CheckField::Username => state.field_exists.username = exists,
            CheckField::Email => state.field_exists.email = exists,
            CheckField::Nickname => state.field_exists.nickname = exists,
        }
        exists
    }

    /// Restores the session from persisted credentials at startup.
    ///
    /// Fail-closed: any failure along the way (storage error, corrupt
    /// record, rejected or unreachable verification) leaves the session
    /// fully anonymous with storage cleared.
    pub async fn init_auth(&self) -> Result<()> {
        let stored = match self.credentials.load().await {
            Ok(Some(stored)) => stored,
            Ok(None) => return Ok(()),
            Err(e) => {
                tracing::warn!("failed to load persisted credentials, starting anonymous: {}", e);
                self.teardown_local().await;
                return Ok(());
            }
        };

        self.token.set(&stored.token);
        {
            let mut state = self.state.write().await;
            // Show the persisted user immediately; verification refreshes it.
            state.user = stored.user;
            state.phase = SessionPhase::Authenticating;
        }

        match self.fetch_user_profile().await {
            Ok(_) => {
                self.state.write().await.phase = SessionPhase::Authenticated;
                tracing::info!("session restored from persisted credentials");
                Ok(())
            }
            Err(e) => {
                tracing::info!("persisted token failed verification, starting anonymous: {}", e);
                self.teardown_local().await;
                Ok(())
            }
        }
    }

    /// Spawns a task that tears the session down whenever the transport
    /// publishes an unauthorized signal.
    pub fn listen_for_auth_signals(
        &self,
        mut receiver: broadcast::Receiver<AuthSignal>,
    ) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(AuthSignal::Unauthorized) => {
                        tracing::info!("unauthorized signal received, clearing session");
                        store.teardown_local().await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Missed signals all mean the same thing; one
                        // teardown covers them.
                        tracing::debug!(skipped, "auth signal receiver lagged");
                        store.teardown_local().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Clears token, user, phase and persisted credentials.
    async fn teardown_local(&self) {
        self.token.clear();
        {
            let mut state = self.state.write().await;
            state.user = None;
            state.phase = SessionPhase::Anonymous;
            state.loading = false;
        }
        if let Err(e) = self.credentials.clear().await {
            tracing::warn!("failed to clear persisted credentials: {}", e);
        }
    }
}
