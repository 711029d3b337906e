//! Emotions resource client.

use async_trait::async_trait;
use reqwest::Method;

use clou_core::emotion::{Emotion, EmotionApi};
use clou_core::error::Result;
use clou_core::movie::Movie;

use crate::http::HttpClient;

/// Client for the `emotions/` resource.
#[derive(Clone)]
pub struct EmotionClient {
    http: HttpClient,
}

impl EmotionClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl EmotionApi for EmotionClient {
    async fn list(&self) -> Result<Vec<Emotion>> {
        self.http.request(Method::GET, "/emotions/", None).await
    }

    async fn movies_for(&self, emotion_name: &str) -> Result<Vec<Movie>> {
        self.http
            .request(
                Method::GET,
                &format!("/emotions/{}/movies/", emotion_name),
                None,
            )
            .await
    }

    async fn movie_emotions(&self, tmdb_id: i64) -> Result<Vec<Emotion>> {
        self.http
            .request(Method::GET, &format!("/emotions/movies/{}/", tmdb_id), None)
            .await
    }
}
