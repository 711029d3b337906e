//! Accounts resource client.
//!
//! Implements [`AuthApi`] over the HTTP adapter, including the dual parsing
//! of signup error bodies: the backend returns structured JSON field errors
//! for 400s, but database-constraint violations surface as HTML 500 pages
//! whose text embeds `UNIQUE constraint failed: accounts_user.<field>`.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};

use clou_core::auth::{
    AuthApi, CheckField, PasswordChange, ProfileUpdate, RegistrationForm, UserProfile,
};
use clou_core::error::{ClouError, Result};

use crate::http::HttpClient;

/// Login response from dj-rest-auth: the token under `key`.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    key: String,
}

#[derive(Debug, Deserialize)]
struct ExistsResponse {
    exists: bool,
}

/// Client for the `accounts/` resource.
#[derive(Clone)]
pub struct AuthClient {
    http: HttpClient,
}

impl AuthClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let body = json!({ "username": username, "password": password });
        match self
            .http
            .request::<LoginResponse>(Method::POST, "/accounts/login/", Some(&body))
            .await
        {
            Ok(response) => Ok(response.key),
            Err(ClouError::Server { status: 400, body }) => Err(parse_field_errors(&body)
                .unwrap_or_else(|| {
                    ClouError::validation_message("invalid username or password")
                })),
            Err(e) => Err(e),
        }
    }

    async fn signup(&self, form: &RegistrationForm) -> Result<()> {
        let body = json!({
            "username": form.username,
            "email": form.email,
            "nickname": form.nickname,
            "password1": form.password1,
            "password2": form.password2,
        });
        // request_unit discards the response body, so a token-like `key`
        // field in the 201 payload is never retained.
        match self
            .http
            .request_unit(Method::POST, "/accounts/signup/", Some(&body))
            .await
        {
            Ok(()) => Ok(()),
            Err(ClouError::Server { status, body }) => Err(parse_signup_error(status, &body)),
            Err(e) => Err(e),
        }
    }

    async fn logout(&self) -> Result<()> {
        self.http
            .request_unit(Method::POST, "/accounts/logout/", Some(&json!({})))
            .await
    }

    async fn fetch_profile(&self) -> Result<UserProfile> {
        self.http
            .request(Method::GET, "/accounts/user/", None)
            .await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let body = serde_json::to_value(update)?;
        self.http
            .request(Method::PUT, "/accounts/user/", Some(&body))
            .await
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        let body = json!({
            "old_password": change.old_password,
            "new_password1": change.new_password1,
            "new_password2": change.new_password2,
        });
        match self
            .http
            .request_unit(Method::POST, "/accounts/password/change/", Some(&body))
            .await
        {
            Ok(()) => Ok(()),
            Err(ClouError::Server { status: 400, body }) => Err(parse_field_errors(&body)
                .unwrap_or(ClouError::Server { status: 400, body })),
            Err(e) => Err(e),
        }
    }

    async fn check_field_exists(&self, field: CheckField, value: &str) -> Result<bool> {
        let body = json!({ field.payload_key(): value });
        let response: ExistsResponse = self
            .http
            .request(Method::POST, field.endpoint(), Some(&body))
            .await?;
        Ok(response.exists)
    }
}

/// Parses a DRF-style JSON error body (`{"field": ["message", ...]}`) into a
/// field-level validation error. Returns `None` when the body is not shaped
/// that way.
fn parse_field_errors(body: &str) -> Option<ClouError> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    let (field, messages) = object.iter().next()?;
    let message = match messages {
        Value::Array(items) => items.first()?.as_str()?.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };
    if field == "non_field_errors" {
        Some(ClouError::validation_message(message))
    } else {
        Some(ClouError::validation(field.clone(), message))
    }
}

/// Normalizes a signup failure.
///
/// 400s carry structured field errors; 500s may be HTML pages embedding a
/// database constraint message, which we map back to the offending field so
/// the form can highlight it.
fn parse_signup_error(status: u16, body: &str) -> ClouError {
    if status == 500 && body.contains("UNIQUE constraint failed") {
        let field = if body.contains("accounts_user.nickname") {
            Some("nickname")
        } else if body.contains("accounts_user.username") {
            Some("username")
        } else if body.contains("accounts_user.email") {
            Some("email")
        } else {
            None
        };
        return match field {
            Some(field) => ClouError::validation(field, format!("{} is already taken", field)),
            None => ClouError::server(status, "database constraint violation"),
        };
    }
    if status == 400 {
        if let Some(err) = parse_field_errors(body) {
            return err;
        }
    }
    ClouError::server(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_errors_takes_first_message() {
        let body = r#"{"email": ["already in use", "second"]}"#;
        let err = parse_field_errors(body).unwrap();
        match err {
            ClouError::Validation { field, message } => {
                assert_eq!(field.as_deref(), Some("email"));
                assert_eq!(message, "already in use");
            }
            other => panic!("expected validation, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_field_errors_have_no_field() {
        let body = r#"{"non_field_errors": ["unable to log in"]}"#;
        let err = parse_field_errors(body).unwrap();
        assert!(matches!(err, ClouError::Validation { field: None, .. }));
    }

    #[test]
    fn test_parse_field_errors_rejects_html() {
        assert!(parse_field_errors("<html>Server Error (500)</html>").is_none());
    }

    #[test]
    fn test_signup_unique_constraint_maps_to_field() {
        let body = "<html>IntegrityError: UNIQUE constraint failed: accounts_user.nickname</html>";
        let err = parse_signup_error(500, body);
        match err {
            ClouError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("nickname")),
            other => panic!("expected validation, got {:?}", other),
        }
    }

    #[test]
    fn test_signup_unknown_constraint_stays_server_error() {
        let body = "<html>UNIQUE constraint failed: accounts_user.mystery</html>";
        assert!(parse_signup_error(500, body).is_server());
    }

    #[test]
    fn test_signup_400_uses_structured_errors() {
        let err = parse_signup_error(400, r#"{"username": ["required"]}"#);
        assert!(err.is_validation());
    }

    #[test]
    fn test_signup_other_statuses_pass_through() {
        assert!(parse_signup_error(502, "bad gateway").is_server());
    }

    #[test]
    fn test_login_response_parses_key() {
        let response: LoginResponse = serde_json::from_str(r#"{"key": "tok-1"}"#).unwrap();
        assert_eq!(response.key, "tok-1");
    }
}
