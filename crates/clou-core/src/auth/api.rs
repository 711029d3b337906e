//! Auth resource API trait.
//!
//! Defines the interface to the `accounts/` backend resource, decoupling the
//! session store from the HTTP transport.

use async_trait::async_trait;

use super::model::{CheckField, PasswordChange, ProfileUpdate, RegistrationForm, UserProfile};
use crate::error::Result;

/// An abstract client for the accounts resource.
///
/// The session store only talks to this trait; the reqwest-backed
/// implementation lives in the client crate, and tests substitute in-memory
/// fakes.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token (`POST accounts/login/`).
    ///
    /// # Returns
    ///
    /// The raw token string from the backend's `{key}` response.
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Registers a new account (`POST accounts/signup/`).
    ///
    /// Registration is a side action: implementations must not retain any
    /// token-like field the backend includes in the response.
    async fn signup(&self, form: &RegistrationForm) -> Result<()>;

    /// Invalidates the current token server-side (`POST accounts/logout/`).
    async fn logout(&self) -> Result<()>;

    /// Fetches the current user's profile (`GET accounts/user/`).
    async fn fetch_profile(&self) -> Result<UserProfile>;

    /// Applies a partial profile update (`PUT accounts/user/`).
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile>;

    /// Changes the account password (`POST accounts/password/change/`).
    async fn change_password(&self, change: &PasswordChange) -> Result<()>;

    /// Probes whether a signup field value is already taken.
    ///
    /// # Returns
    ///
    /// The backend's `exists` flag.
    async fn check_field_exists(&self, field: CheckField, value: &str) -> Result<bool>;
}
