//! Per-key in-flight request tracking.
//!
//! Two mechanisms, both keyed by resource identity:
//!
//! - **Fetch tickets**: every collection fetch takes a ticket; only the most
//!   recently issued ticket for a key may write its response into the store.
//!   A superseded response is dropped instead of overwriting newer state.
//! - **Mutation locks**: one async mutex per resource key serializes
//!   mutations, so there is never more than one outstanding mutation per
//!   identifier. The stores' `loading` flag stays purely advisory.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use uuid::Uuid;

/// Ticket identifying one issued fetch for a store slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: String,
    id: Uuid,
}

/// Tracks in-flight requests per resource key.
#[derive(Clone, Default)]
pub struct InFlightTracker {
    fetches: Arc<StdMutex<HashMap<String, Uuid>>>,
    mutations: Arc<StdMutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl InFlightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fetch ticket for `key`, superseding any earlier ticket for
    /// the same key.
    pub fn begin_fetch(&self, key: &str) -> FetchTicket {
        let id = Uuid::new_v4();
        self.fetches
            .lock()
            .expect("fetch map poisoned")
            .insert(key.to_string(), id);
        FetchTicket {
            key: key.to_string(),
            id,
        }
    }

    /// Whether `ticket` is still the most recently issued fetch for its key.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.fetches
            .lock()
            .expect("fetch map poisoned")
            .get(&ticket.key)
            .is_some_and(|id| *id == ticket.id)
    }

    /// Returns the mutation lock for `key`, creating it on first use.
    ///
    /// Callers hold the lock guard across the whole request/reconcile cycle.
    pub fn mutation_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.mutations
            .lock()
            .expect("mutation map poisoned")
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_fetch_supersedes_older() {
        let tracker = InFlightTracker::new();
        let first = tracker.begin_fetch("movies");
        let second = tracker.begin_fetch("movies");

        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
    }

    #[test]
    fn test_keys_are_independent() {
        let tracker = InFlightTracker::new();
        let movies = tracker.begin_fetch("movies");
        let diary = tracker.begin_fetch("diary");

        assert!(tracker.is_current(&movies));
        assert!(tracker.is_current(&diary));
    }

    #[test]
    fn test_mutation_lock_is_shared_per_key() {
        let tracker = InFlightTracker::new();
        let a = tracker.mutation_lock("movie-like:1");
        let b = tracker.mutation_lock("movie-like:1");
        let other = tracker.mutation_lock("movie-like:2");

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[tokio::test]
    async fn test_mutation_lock_serializes() {
        let tracker = InFlightTracker::new();
        let lock = tracker.mutation_lock("diary:1");

        let guard = lock.lock().await;
        assert!(tracker.mutation_lock("diary:1").try_lock().is_err());
        drop(guard);
        assert!(tracker.mutation_lock("diary:1").try_lock().is_ok());
    }
}
