//! Emotion store.
//!
//! Emotions are static reference data: fetched once per run, then served
//! from the cache. The store also holds the movie list of the currently
//! browsed emotion.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use clou_core::emotion::{Emotion, EmotionApi};
use clou_core::error::Result;
use clou_core::movie::Movie;

use crate::inflight::InFlightTracker;

/// Fetch-ticket key for the per-emotion movie list slot.
const EMOTION_MOVIES_KEY: &str = "emotion:movies";

#[derive(Debug, Clone, Default)]
struct EmotionState {
    emotions: Vec<Emotion>,
    selected: Option<Emotion>,
    movies_by_emotion: Vec<Movie>,
    loading: bool,
    error: Option<String>,
}

/// Read-only view of the emotion store.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionSnapshot {
    pub emotions: Vec<Emotion>,
    pub selected: Option<Emotion>,
    pub movies_by_emotion: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Store for emotion reference data and emotion-filtered movie lists.
#[derive(Clone)]
pub struct EmotionStore {
    api: Arc<dyn EmotionApi>,
    state: Arc<RwLock<EmotionState>>,
    inflight: InFlightTracker,
}

impl EmotionStore {
    pub fn new(api: Arc<dyn EmotionApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(EmotionState::default())),
            inflight: InFlightTracker::new(),
        }
    }

    pub async fn snapshot(&self) -> EmotionSnapshot {
        let state = self.state.read().await;
        EmotionSnapshot {
            emotions: state.emotions.clone(),
            selected: state.selected.clone(),
            movies_by_emotion: state.movies_by_emotion.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Looks an emotion up by name in the cached reference data.
    pub async fn emotion_by_name(&self, name: &str) -> Option<Emotion> {
        self.state
            .read()
            .await
            .emotions
            .iter()
            .find(|e| e.name == name)
            .cloned()
    }

    /// Marks an emotion as selected without fetching anything.
    pub async fn set_selected(&self, emotion: Emotion) {
        self.state.write().await.selected = Some(emotion);
    }

    /// Fetches the emotion list, serving the cache after the first success.
    pub async fn fetch_emotions(&self) -> Result<Vec<Emotion>> {
        {
            let state = self.state.read().await;
            if !state.emotions.is_empty() {
                return Ok(state.emotions.clone());
            }
        }

        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        match self.api.list().await {
            Ok(emotions) => {
                let mut state = self.state.write().await;
                state.emotions = emotions.clone();
                state.loading = false;
                Ok(emotions)
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetches the movies tagged with `emotion_name` and selects that
    /// emotion when it is known.
    pub async fn fetch_movies_by_emotion(&self, emotion_name: &str) -> Result<Vec<Movie>> {
        let ticket = self.inflight.begin_fetch(EMOTION_MOVIES_KEY);
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        match self.api.movies_for(emotion_name).await {
            Ok(movies) => {
                if self.inflight.is_current(&ticket) {
                    let mut state = self.state.write().await;
                    state.movies_by_emotion = movies.clone();
                    let selected = state
                        .emotions
                        .iter()
                        .find(|e| e.name == emotion_name)
                        .cloned();
                    if selected.is_some() {
                        state.selected = selected;
                    }
                    state.loading = false;
                } else {
                    tracing::debug!(emotion_name, "stale emotion movie list dropped");
                }
                Ok(movies)
            }
            Err(e) => {
                if self.inflight.is_current(&ticket) {
                    let mut state = self.state.write().await;
                    state.loading = false;
                    state.error = Some(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Fetches the emotions tagged on a movie. Pure passthrough: nothing is
    /// cached, the detail view owns the result.
    pub async fn fetch_movie_emotions(&self, tmdb_id: i64) -> Result<Vec<Emotion>> {
        self.api.movie_emotions(tmdb_id).await
    }
}
