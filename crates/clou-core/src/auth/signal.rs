//! Authentication signals published by the transport.
//!
//! A 401 can arrive on any resource call, but session teardown belongs to
//! the session store. The transport only publishes an [`AuthSignal`] on a
//! broadcast channel; the session store subscribes and owns the cleanup.
//! This keeps the transport free of session-specific logic.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Capacity of the auth signal channel. Signals are rare (one per rejected
/// token), so a small buffer is enough; a lagging subscriber only ever needs
/// the fact that at least one signal arrived.
const SIGNAL_CHANNEL_CAPACITY: usize = 8;

/// High-level authentication events published by the transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthSignal {
    /// The backend rejected the current token with 401.
    Unauthorized,
}

/// Creates the broadcast channel used to deliver [`AuthSignal`]s.
pub fn auth_signal_channel() -> (broadcast::Sender<AuthSignal>, broadcast::Receiver<AuthSignal>) {
    broadcast::channel(SIGNAL_CHANNEL_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_is_delivered_to_subscriber() {
        let (tx, mut rx) = auth_signal_channel();
        tx.send(AuthSignal::Unauthorized).unwrap();
        assert_eq!(rx.recv().await.unwrap(), AuthSignal::Unauthorized);
    }
}
