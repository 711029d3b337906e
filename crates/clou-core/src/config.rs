//! Client configuration domain model.

use serde::{Deserialize, Serialize};

/// Default backend base URL (local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
///
/// Every outgoing request is bounded by this timeout; an elapsed timeout
/// surfaces as a network error.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the HTTP transport.
///
/// Loaded from `~/.config/clou/config.toml` when present; a missing file or
/// missing keys fall back to the defaults above.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at the given base URL, keeping default timeouts.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Returns the base URL with any trailing slash removed.
    ///
    /// The backend treats trailing slashes on resource paths as significant,
    /// so paths own their slashes and the base must not contribute one.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
