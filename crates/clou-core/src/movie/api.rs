//! Movie resource API trait.

use async_trait::async_trait;

use super::model::{LikeStatus, Movie, MovieDetail, Review, ReviewReply};
use crate::error::Result;

/// An abstract client for the movies resource, including nested reviews and
/// replies.
///
/// All movie-level operations are keyed by `tmdb_id`; review and reply
/// operations by their own server ids.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Fetches the full catalog (`GET movies/`).
    async fn list(&self) -> Result<Vec<Movie>>;

    /// Fetches one movie with nested reviews and soundtrack
    /// (`GET movies/{tmdb_id}/`).
    async fn detail(&self, tmdb_id: i64) -> Result<MovieDetail>;

    /// Toggles the like flag for the current user
    /// (`POST movies/{tmdb_id}/like/`).
    ///
    /// # Returns
    ///
    /// The server-reported [`LikeStatus`]; callers adopt `liked` rather than
    /// inverting their local value.
    async fn toggle_like(&self, tmdb_id: i64) -> Result<LikeStatus>;

    /// Searches the catalog (`GET movies/search/?query=`).
    async fn search(&self, query: &str) -> Result<Vec<Movie>>;

    /// Lists the reviews of a movie (`GET movies/{tmdb_id}/reviews/`).
    async fn reviews(&self, tmdb_id: i64) -> Result<Vec<Review>>;

    /// Creates a review (`POST movies/{tmdb_id}/reviews/`).
    async fn create_review(&self, tmdb_id: i64, content: &str) -> Result<Review>;

    /// Updates a review (`PUT movies/reviews/{review_id}/`).
    async fn update_review(&self, review_id: i64, content: &str) -> Result<Review>;

    /// Deletes a review (`DELETE movies/reviews/{review_id}/`).
    async fn delete_review(&self, review_id: i64) -> Result<()>;

    /// Toggles the like flag on a review
    /// (`POST movies/reviews/{review_id}/like/`).
    async fn toggle_review_like(&self, review_id: i64) -> Result<LikeStatus>;

    /// Creates a reply under a review
    /// (`POST movies/reviews/{review_id}/replies/`).
    async fn create_reply(&self, review_id: i64, content: &str) -> Result<ReviewReply>;

    /// Updates a reply (`PUT movies/replies/{reply_id}/`).
    async fn update_reply(&self, reply_id: i64, content: &str) -> Result<ReviewReply>;

    /// Deletes a reply (`DELETE movies/replies/{reply_id}/`).
    async fn delete_reply(&self, reply_id: i64) -> Result<()>;
}
