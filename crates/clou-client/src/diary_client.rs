//! Diary resource client.

use async_trait::async_trait;
use reqwest::Method;

use clou_core::diary::{DiaryApi, DiaryDraft, DiaryEntry};
use clou_core::error::{ClouError, Result};

use crate::http::HttpClient;

/// Client for the `diary/` resource.
#[derive(Clone)]
pub struct DiaryClient {
    http: HttpClient,
}

impl DiaryClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DiaryApi for DiaryClient {
    async fn list(&self) -> Result<Vec<DiaryEntry>> {
        self.http.request(Method::GET, "/diary/", None).await
    }

    async fn monthly(&self, year: i32, month: u32) -> Result<Vec<DiaryEntry>> {
        // The backend expects a calendar month; reject out-of-range values
        // before they become a 404.
        if !(1..=12).contains(&month) {
            return Err(ClouError::validation(
                "month",
                format!("month must be between 1 and 12, got {}", month),
            ));
        }
        self.http
            .request(
                Method::GET,
                &format!("/diary/monthly/{}/{}/", year, month),
                None,
            )
            .await
    }

    async fn get(&self, id: i64) -> Result<DiaryEntry> {
        self.http
            .request(Method::GET, &format!("/diary/{}/", id), None)
            .await
    }

    async fn create(&self, draft: &DiaryDraft) -> Result<DiaryEntry> {
        draft.validate_for_create()?;
        let body = serde_json::to_value(draft)?;
        self.http
            .request(Method::POST, "/diary/", Some(&body))
            .await
    }

    async fn update(&self, id: i64, draft: &DiaryDraft) -> Result<DiaryEntry> {
        let body = serde_json::to_value(draft)?;
        self.http
            .request(Method::PUT, &format!("/diary/{}/", id), Some(&body))
            .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.http
            .request_unit(Method::DELETE, &format!("/diary/{}/", id), None)
            .await
    }
}
