//! Diary domain models.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;
use crate::error::{ClouError, Result};
use crate::movie::Movie;

/// A diary entry as returned by the backend.
///
/// `date` is the user-chosen day of the entry (distinct from `created_at`)
/// and drives all calendar grouping. `emotion`/`movie` carry the foreign ids,
/// the `*_detail` fields the expanded records when the serializer includes
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiaryEntry {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub emotion: Option<i64>,
    #[serde(default)]
    pub emotion_detail: Option<Emotion>,
    #[serde(default)]
    pub movie: Option<i64>,
    #[serde(default)]
    pub movie_detail: Option<Movie>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl DiaryEntry {
    /// Whether this entry falls in the given year/month.
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}

/// Client-side payload for creating or updating an entry.
///
/// `date` is required at creation time and validated locally, so a draft
/// with no date never reaches the network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiaryDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<i64>,
}

impl DiaryDraft {
    /// Creates a draft for the given date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_emotion(mut self, emotion_id: i64) -> Self {
        self.emotion = Some(emotion_id);
        self
    }

    pub fn with_movie(mut self, movie_id: i64) -> Self {
        self.movie = Some(movie_id);
        self
    }

    /// Validates the draft for creation.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: the draft can be sent
    /// - `Err(ClouError::Validation)`: the required date is missing
    pub fn validate_for_create(&self) -> Result<()> {
        if self.date.is_none() {
            return Err(ClouError::validation("date", "date is required"));
        }
        Ok(())
    }
}
