//! Authentication domain models.

use serde::{Deserialize, Serialize};

/// Current user profile as reported by `GET accounts/user/`.
///
/// The record is owned by the session store and replaced wholesale on every
/// profile fetch; the client never edits it field-by-field. The favorite
/// movie detail is kept opaque because the session layer only carries it
/// through to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub favorite_movie_detail: Option<serde_json::Value>,
}

/// Token and user record persisted in local storage between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredCredentials {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl StoredCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user = Some(user);
        self
    }
}

/// Signup payload, mirroring the backend registration serializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub nickname: String,
    pub password1: String,
    pub password2: String,
}

/// Partial profile update for `PUT accounts/user/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_movie: Option<i64>,
}

/// Payload for `POST accounts/password/change/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

/// Signup fields that support a uniqueness probe against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckField {
    Username,
    Email,
    Nickname,
}

impl CheckField {
    /// The resource path of the probe endpoint, trailing slash included.
    pub fn endpoint(&self) -> &'static str {
        match self {
            CheckField::Username => "/accounts/check-username/",
            CheckField::Email => "/accounts/check-email/",
            CheckField::Nickname => "/accounts/check-nickname/",
        }
    }

    /// The JSON key the probe endpoint expects.
    pub fn payload_key(&self) -> &'static str {
        match self {
            CheckField::Username => "username",
            CheckField::Email => "email",
            CheckField::Nickname => "nickname",
        }
    }
}

/// Cached results of the uniqueness probes, one flag per field.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldExists {
    pub username: bool,
    pub email: bool,
    pub nickname: bool,
}

/// Lifecycle phase of the session store.
///
/// `Failed` keeps anonymous semantics: the token is absent and protected
/// calls are rejected, but the last error stays readable for the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    Failed,
}
