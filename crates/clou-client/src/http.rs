//! HTTP transport adapter.
//!
//! Wraps `reqwest::Client` with the backend base URL, a bounded per-request
//! timeout, token header injection, and error normalization. The adapter is
//! the only place that looks at raw HTTP statuses; everything above it sees
//! [`ClouError`].
//!
//! A 401 has one global side effect here: the shared token cell is cleared
//! and an [`AuthSignal::Unauthorized`] is published. Session teardown itself
//! (user record, persisted credentials) is owned by the session store, which
//! subscribes to the signal channel.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;

use clou_core::auth::{AuthSignal, TokenCell, auth_signal_channel};
use clou_core::config::ClientConfig;
use clou_core::error::{ClouError, Result};

/// Transport adapter shared by all resource clients.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    token: TokenCell,
    signals: broadcast::Sender<AuthSignal>,
}

impl HttpClient {
    /// Creates an adapter from the given config and shared token cell.
    pub fn new(config: &ClientConfig, token: TokenCell) -> Self {
        let (signals, _) = auth_signal_channel();
        Self {
            client: Client::new(),
            base_url: config.normalized_base_url().to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
            token,
            signals,
        }
    }

    /// The token cell this adapter injects into outgoing requests.
    pub fn token(&self) -> &TokenCell {
        &self.token
    }

    /// Subscribes to authentication signals published by this adapter.
    pub fn subscribe_auth_signals(&self) -> broadcast::Receiver<AuthSignal> {
        self.signals.subscribe()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and returns the raw response, or a normalized error.
    ///
    /// `path` must start with `/` and keep its trailing slash: the backend
    /// treats trailing slashes as significant.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, &str)]>,
        body: Option<&Value>,
    ) -> Result<reqwest::Response> {
        let mut request = self
            .client
            .request(method.clone(), self.url(path))
            .timeout(self.timeout);

        if let Some(token) = self.token.get() {
            request = request.header("Authorization", format!("Token {}", token));
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, path, "no response received: {}", e);
            ClouError::network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body_text = response.text().await.unwrap_or_default();
        Err(self.normalize_error(status, body_text, path))
    }

    fn normalize_error(&self, status: StatusCode, body: String, path: &str) -> ClouError {
        match status {
            StatusCode::UNAUTHORIZED => {
                // The token is invalid for the whole session, not just this
                // call: drop it and notify the session store, then still
                // surface the error to the caller.
                self.token.clear();
                let _ = self.signals.send(AuthSignal::Unauthorized);
                tracing::warn!(path, "401 received, token dropped and signal published");
                ClouError::unauthorized(if body.is_empty() {
                    "authentication required".to_string()
                } else {
                    body
                })
            }
            StatusCode::FORBIDDEN => ClouError::Forbidden(body),
            _ => ClouError::server(status.as_u16(), body),
        }
    }

    /// Sends a request and deserializes the JSON response body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        let response = self.send(method, path, None, body).await?;
        response.json::<T>().await.map_err(|e| ClouError::Serialization {
            format: "JSON".to_string(),
            message: e.to_string(),
        })
    }

    /// GET with query parameters, deserializing the JSON response body.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.send(Method::GET, path, Some(query), None).await?;
        response.json::<T>().await.map_err(|e| ClouError::Serialization {
            format: "JSON".to_string(),
            message: e.to_string(),
        })
    }

    /// Sends a request and discards the response body (204-style endpoints,
    /// and responses whose body must not be retained).
    pub async fn request_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<()> {
        self.send(method, path, None, body).await?;
        Ok(())
    }
}
