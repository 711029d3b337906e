//! Diary resource API trait.

use async_trait::async_trait;

use super::model::{DiaryDraft, DiaryEntry};
use crate::error::Result;

/// An abstract client for the diary resource.
#[async_trait]
pub trait DiaryApi: Send + Sync {
    /// Fetches all entries of the current user (`GET diary/`).
    async fn list(&self) -> Result<Vec<DiaryEntry>>;

    /// Fetches the entries of one month
    /// (`GET diary/monthly/{year}/{month}/`, month in 1..=12).
    async fn monthly(&self, year: i32, month: u32) -> Result<Vec<DiaryEntry>>;

    /// Fetches a single entry (`GET diary/{id}/`).
    async fn get(&self, id: i64) -> Result<DiaryEntry>;

    /// Creates an entry (`POST diary/`).
    async fn create(&self, draft: &DiaryDraft) -> Result<DiaryEntry>;

    /// Partially updates an entry (`PUT diary/{id}/`).
    async fn update(&self, id: i64, draft: &DiaryDraft) -> Result<DiaryEntry>;

    /// Deletes an entry (`DELETE diary/{id}/`).
    async fn delete(&self, id: i64) -> Result<()>;
}
