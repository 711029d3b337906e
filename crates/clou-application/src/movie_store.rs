//! Movie store.
//!
//! Caches the movie catalog and the currently selected detail, and
//! reconciles like/review/reply mutations against server responses. All
//! reconciliation is by resource identity (`tmdb_id`, review id, reply id),
//! never by collection index.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use clou_core::error::Result;
use clou_core::movie::{LikeStatus, Movie, MovieApi, MovieDetail, Review, ReviewReply};

use crate::inflight::InFlightTracker;

/// Fetch-ticket key for the catalog collection.
const CATALOG_KEY: &str = "movies";
/// Fetch-ticket key for the single detail slot.
const DETAIL_KEY: &str = "movie:current";

#[derive(Debug, Clone, Default)]
struct MovieState {
    movies: Vec<Movie>,
    current: Option<MovieDetail>,
    loading: bool,
    error: Option<String>,
}

/// Read-only view of the movie store.
#[derive(Debug, Clone, Serialize)]
pub struct MovieSnapshot {
    pub movies: Vec<Movie>,
    pub current: Option<MovieDetail>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Store for the movie catalog, likes, reviews and replies.
#[derive(Clone)]
pub struct MovieStore {
    api: Arc<dyn MovieApi>,
    state: Arc<RwLock<MovieState>>,
    inflight: InFlightTracker,
}

impl MovieStore {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(MovieState::default())),
            inflight: InFlightTracker::new(),
        }
    }

    pub async fn snapshot(&self) -> MovieSnapshot {
        let state = self.state.read().await;
        MovieSnapshot {
            movies: state.movies.clone(),
            current: state.current.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Movies the current user has liked, in catalog order.
    pub async fn liked_movies(&self) -> Vec<Movie> {
        self.state
            .read()
            .await
            .movies
            .iter()
            .filter(|m| m.is_liked)
            .cloned()
            .collect()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn fail(&self, error: &clou_core::ClouError) {
        let mut state = self.state.write().await;
        state.loading = false;
        state.error = Some(error.to_string());
    }

    /// Fetches the catalog. A response superseded by a newer fetch is
    /// returned to the caller but not written into the store.
    pub async fn fetch_movies(&self) -> Result<Vec<Movie>> {
        let ticket = self.inflight.begin_fetch(CATALOG_KEY);
        self.begin().await;

        match self.api.list().await {
            Ok(movies) => {
                if self.inflight.is_current(&ticket) {
                    let mut state = self.state.write().await;
                    state.movies = movies.clone();
                    state.loading = false;
                } else {
                    tracing::debug!("stale catalog response dropped");
                }
                Ok(movies)
            }
            Err(e) => {
                if self.inflight.is_current(&ticket) {
                    self.fail(&e).await;
                }
                Err(e)
            }
        }
    }

    /// Fetches one movie into the detail slot.
    pub async fn fetch_movie(&self, tmdb_id: i64) -> Result<MovieDetail> {
        let ticket = self.inflight.begin_fetch(DETAIL_KEY);
        self.begin().await;

        match self.api.detail(tmdb_id).await {
            Ok(detail) => {
                if self.inflight.is_current(&ticket) {
                    let mut state = self.state.write().await;
                    state.current = Some(detail.clone());
                    state.loading = false;
                } else {
                    tracing::debug!(tmdb_id, "stale detail response dropped");
                }
                Ok(detail)
            }
            Err(e) => {
                if self.inflight.is_current(&ticket) {
                    self.fail(&e).await;
                }
                Err(e)
            }
        }
    }

    /// Searches the catalog. Results are returned, not cached: the main
    /// collection stays untouched.
    pub async fn search(&self, query: &str) -> Result<Vec<Movie>> {
        self.begin().await;
        match self.api.search(query).await {
            Ok(movies) => {
                self.state.write().await.loading = false;
                Ok(movies)
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Toggles the like flag for a movie, keyed by `tmdb_id`.
    ///
    /// The server reports the resulting boolean; the store adopts it rather
    /// than inverting its prior local value, so repeated identical responses
    /// are idempotent. Mutations on the same movie are serialized.
    pub async fn toggle_like(&self, tmdb_id: i64) -> Result<LikeStatus> {
        let lock = self.inflight.mutation_lock(&format!("movie-like:{}", tmdb_id));
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.toggle_like(tmdb_id).await {
            Ok(status) => {
                let mut state = self.state.write().await;
                state.loading = false;
                if let Some(movie) = state.movies.iter_mut().find(|m| m.tmdb_id == tmdb_id) {
                    movie.is_liked = status.liked;
                }
                if let Some(current) = state.current.as_mut()
                    && current.tmdb_id == tmdb_id
                {
                    current.is_liked = status.liked;
                }
                Ok(status)
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Creates a review on a movie and reconciles the loaded detail.
    pub async fn create_review(&self, tmdb_id: i64, content: &str) -> Result<Review> {
        let lock = self
            .inflight
            .mutation_lock(&format!("movie-reviews:{}", tmdb_id));
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.create_review(tmdb_id, content).await {
            Ok(review) => {
                let mut state = self.state.write().await;
                state.loading = false;
                if let Some(current) = state.current.as_mut()
                    && current.tmdb_id == tmdb_id
                    && !current.reviews.iter().any(|r| r.id == review.id)
                {
                    // Newest first, matching the backend ordering.
                    current.reviews.insert(0, review.clone());
                }
                Ok(review)
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Updates a review and replaces it in the loaded detail by id.
    pub async fn update_review(&self, review_id: i64, content: &str) -> Result<Review> {
        let lock = self.inflight.mutation_lock(&format!("review:{}", review_id));
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.update_review(review_id, content).await {
            Ok(review) => {
                let mut state = self.state.write().await;
                state.loading = false;
                if let Some(current) = state.current.as_mut()
                    && let Some(existing) =
                        current.reviews.iter_mut().find(|r| r.id == review_id)
                {
                    // The update endpoint does not echo replies; keep ours.
                    let replies = std::mem::take(&mut existing.replies);
                    *existing = review.clone();
                    if existing.replies.is_empty() {
                        existing.replies = replies;
                    }
                }
                Ok(review)
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Deletes a review and removes it from the loaded detail by id.
    pub async fn delete_review(&self, review_id: i64) -> Result<()> {
        let lock = self.inflight.mutation_lock(&format!("review:{}", review_id));
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.delete_review(review_id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.loading = false;
                if let Some(current) = state.current.as_mut() {
                    current.reviews.retain(|r| r.id != review_id);
                }
                Ok(())
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Toggles the like flag on a review, adopting the server-reported count.
    pub async fn toggle_review_like(&self, review_id: i64) -> Result<LikeStatus> {
        let lock = self
            .inflight
            .mutation_lock(&format!("review-like:{}", review_id));
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.toggle_review_like(review_id).await {
            Ok(status) => {
                let mut state = self.state.write().await;
                state.loading = false;
                if let Some(current) = state.current.as_mut()
                    && let Some(review) =
                        current.reviews.iter_mut().find(|r| r.id == review_id)
                {
                    review.like_count = status.like_count;
                }
                Ok(status)
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Creates a reply under a review in the loaded detail.
    pub async fn create_reply(&self, review_id: i64, content: &str) -> Result<ReviewReply> {
        let lock = self
            .inflight
            .mutation_lock(&format!("review-replies:{}", review_id));
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.create_reply(review_id, content).await {
            Ok(reply) => {
                let mut state = self.state.write().await;
                state.loading = false;
                if let Some(current) = state.current.as_mut()
                    && let Some(review) =
                        current.reviews.iter_mut().find(|r| r.id == review_id)
                    && !review.replies.iter().any(|r| r.id == reply.id)
                {
                    review.replies.push(reply.clone());
                }
                Ok(reply)
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Updates a reply wherever it appears in the loaded detail.
    pub async fn update_reply(&self, reply_id: i64, content: &str) -> Result<ReviewReply> {
        let lock = self.inflight.mutation_lock(&format!("reply:{}", reply_id));
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.update_reply(reply_id, content).await {
            Ok(reply) => {
                let mut state = self.state.write().await;
                state.loading = false;
                if let Some(current) = state.current.as_mut() {
                    for review in current.reviews.iter_mut() {
                        if let Some(existing) =
                            review.replies.iter_mut().find(|r| r.id == reply_id)
                        {
                            *existing = reply.clone();
                        }
                    }
                }
                Ok(reply)
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    /// Deletes a reply wherever it appears in the loaded detail.
    pub async fn delete_reply(&self, reply_id: i64) -> Result<()> {
        let lock = self.inflight.mutation_lock(&format!("reply:{}", reply_id));
        let _guard = lock.lock().await;

        self.begin().await;
        match self.api.delete_reply(reply_id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.loading = false;
                if let Some(current) = state.current.as_mut() {
                    for review in current.reviews.iter_mut() {
                        review.replies.retain(|r| r.id != reply_id);
                    }
                }
                Ok(())
            }
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }
}
