//! Shared token cell.
//!
//! The transport and the session store both need access to the current
//! authentication token: the transport to inject the `Authorization` header,
//! the session store to set and clear it. [`TokenCell`] is the single owned
//! cell both sides hold a handle to, so session teardown is one `clear()`
//! regardless of how many clients are in flight.

use std::sync::{Arc, RwLock};

/// Shared, cloneable cell holding the current auth token.
#[derive(Debug, Clone, Default)]
pub struct TokenCell {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenCell {
    /// Creates an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell pre-populated with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let cell = Self::new();
        cell.set(token);
        cell
    }

    /// Returns a clone of the current token, if any.
    pub fn get(&self) -> Option<String> {
        self.inner.read().expect("token cell poisoned").clone()
    }

    /// Replaces the current token.
    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().expect("token cell poisoned") = Some(token.into());
    }

    /// Clears the current token.
    pub fn clear(&self) {
        *self.inner.write().expect("token cell poisoned") = None;
    }

    /// Whether a token is currently present.
    pub fn is_present(&self) -> bool {
        self.inner.read().expect("token cell poisoned").is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let cell = TokenCell::new();
        assert!(!cell.is_present());

        cell.set("tok-1");
        assert_eq!(cell.get(), Some("tok-1".to_string()));

        cell.clear();
        assert!(cell.get().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let cell = TokenCell::new();
        let other = cell.clone();
        cell.set("shared");
        assert_eq!(other.get(), Some("shared".to_string()));
    }
}
