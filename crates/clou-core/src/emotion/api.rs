//! Emotion resource API trait.

use async_trait::async_trait;

use super::model::Emotion;
use crate::error::Result;
use crate::movie::Movie;

/// An abstract client for the emotions resource.
#[async_trait]
pub trait EmotionApi: Send + Sync {
    /// Fetches all emotion tags (`GET emotions/`).
    async fn list(&self) -> Result<Vec<Emotion>>;

    /// Fetches the movies tagged with an emotion, by emotion name
    /// (`GET emotions/{name}/movies/`).
    async fn movies_for(&self, emotion_name: &str) -> Result<Vec<Movie>>;

    /// Fetches the emotions tagged on a movie
    /// (`GET emotions/movies/{tmdb_id}/`).
    async fn movie_emotions(&self, tmdb_id: i64) -> Result<Vec<Emotion>>;
}
