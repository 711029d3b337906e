//! Error types for the clou client platform.
//!
//! Every failure that crosses a resource-client or store boundary is
//! normalized into [`ClouError`] so that callers never have to inspect
//! transport-level error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire clou client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ClouError {
    /// Field-level input error. `field` is `None` for non-field errors
    /// (the backend's `non_field_errors` bucket).
    #[error("Validation error ({}): {message}", .field.as_deref().unwrap_or("non_field_errors"))]
    Validation {
        field: Option<String>,
        message: String,
    },

    /// The backend rejected the request with 401.
    ///
    /// This variant has a global side effect: the transport publishes an
    /// unauthorized signal and the session store tears itself down.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The backend rejected the request with 403.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other non-2xx response, carrying status and raw body.
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// No response was received (connect failure, timeout, DNS, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// Local credential/config storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClouError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a field-level validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a non-field validation error.
    pub fn validation_message(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates an Unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a Network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Server error from a status code and response body.
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            status,
            body: body.into(),
        }
    }

    /// Creates a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is an Unauthorized (401) error.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Check if this is a Forbidden (403) error.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Check if this is a transport-level error (no response received).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a server (non-2xx) error.
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ClouError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for ClouError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ClouError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for ClouError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ClouError>`.
pub type Result<T> = std::result::Result<T, ClouError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_includes_field() {
        let err = ClouError::validation("date", "date is required");
        assert_eq!(err.to_string(), "Validation error (date): date is required");
        assert!(err.is_validation());
    }

    #[test]
    fn test_non_field_validation_display() {
        let err = ClouError::validation_message("invalid credentials");
        assert_eq!(
            err.to_string(),
            "Validation error (non_field_errors): invalid credentials"
        );
    }

    #[test]
    fn test_predicates() {
        assert!(ClouError::unauthorized("expired").is_unauthorized());
        assert!(ClouError::network("timeout").is_network());
        assert!(ClouError::server(500, "boom").is_server());
        assert!(!ClouError::server(500, "boom").is_unauthorized());
    }
}
