//! Movies resource client, including nested reviews and replies.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use clou_core::error::Result;
use clou_core::movie::{LikeStatus, Movie, MovieApi, MovieDetail, Review, ReviewReply};

use crate::http::HttpClient;

/// Client for the `movies/` resource.
#[derive(Clone)]
pub struct MovieClient {
    http: HttpClient,
}

impl MovieClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MovieApi for MovieClient {
    async fn list(&self) -> Result<Vec<Movie>> {
        self.http.request(Method::GET, "/movies/", None).await
    }

    async fn detail(&self, tmdb_id: i64) -> Result<MovieDetail> {
        self.http
            .request(Method::GET, &format!("/movies/{}/", tmdb_id), None)
            .await
    }

    async fn toggle_like(&self, tmdb_id: i64) -> Result<LikeStatus> {
        self.http
            .request(Method::POST, &format!("/movies/{}/like/", tmdb_id), None)
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<Movie>> {
        self.http
            .get_with_query("/movies/search/", &[("query", query)])
            .await
    }

    async fn reviews(&self, tmdb_id: i64) -> Result<Vec<Review>> {
        self.http
            .request(Method::GET, &format!("/movies/{}/reviews/", tmdb_id), None)
            .await
    }

    async fn create_review(&self, tmdb_id: i64, content: &str) -> Result<Review> {
        let body = json!({ "content": content });
        self.http
            .request(
                Method::POST,
                &format!("/movies/{}/reviews/", tmdb_id),
                Some(&body),
            )
            .await
    }

    async fn update_review(&self, review_id: i64, content: &str) -> Result<Review> {
        let body = json!({ "content": content });
        self.http
            .request(
                Method::PUT,
                &format!("/movies/reviews/{}/", review_id),
                Some(&body),
            )
            .await
    }

    async fn delete_review(&self, review_id: i64) -> Result<()> {
        self.http
            .request_unit(Method::DELETE, &format!("/movies/reviews/{}/", review_id), None)
            .await
    }

    async fn toggle_review_like(&self, review_id: i64) -> Result<LikeStatus> {
        self.http
            .request(
                Method::POST,
                &format!("/movies/reviews/{}/like/", review_id),
                None,
            )
            .await
    }

    async fn create_reply(&self, review_id: i64, content: &str) -> Result<ReviewReply> {
        let body = json!({ "content": content });
        self.http
            .request(
                Method::POST,
                &format!("/movies/reviews/{}/replies/", review_id),
                Some(&body),
            )
            .await
    }

    async fn update_reply(&self, reply_id: i64, content: &str) -> Result<ReviewReply> {
        let body = json!({ "content": content });
        self.http
            .request(
                Method::PUT,
                &format!("/movies/replies/{}/", reply_id),
                Some(&body),
            )
            .await
    }

    async fn delete_reply(&self, reply_id: i64) -> Result<()> {
        self.http
            .request_unit(Method::DELETE, &format!("/movies/replies/{}/", reply_id), None)
            .await
    }
}
