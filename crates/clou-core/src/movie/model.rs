//! Movie domain models.
//!
//! Field shapes mirror the backend serializers: the list endpoint returns a
//! trimmed record, the detail endpoint the full one plus nested reviews and
//! the soundtrack lookup.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Movie as returned by the list and search endpoints.
///
/// `tmdb_id` is the external identity: likes, detail routes and cache
/// reconciliation are all keyed by it, never by position in the collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub tmdb_id: i64,
    pub title: String,
    pub poster_path: String,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub is_liked: bool,
}

/// Full movie record from `GET movies/{tmdb_id}/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: i64,
    pub tmdb_id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub production_countries: String,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub runtime: Option<f64>,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub keywords: String,
    pub poster_path: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub osts: Vec<Ost>,
}

/// Review nested under a movie detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: i64,
    /// Author display name (the backend serializes the user as a string).
    pub user: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub replies: Vec<ReviewReply>,
    #[serde(default)]
    pub movie: Option<i64>,
}

/// Reply nested under a review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewReply {
    pub id: i64,
    pub user: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub review: Option<i64>,
}

/// Soundtrack entry attached to a movie detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ost {
    pub title: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    pub spotify_url: String,
}

/// Server-reported outcome of a like toggle (`POST .../like/`).
///
/// The backend returns the resulting boolean rather than an acknowledgement,
/// so callers adopt `liked` instead of inverting their local state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeStatus {
    pub liked: bool,
    #[serde(default)]
    pub like_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_list_item_parses_with_defaults() {
        let json = r#"{"id": 1, "tmdb_id": 496243, "title": "Parasite", "poster_path": "/p.jpg"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.tmdb_id, 496243);
        assert!(!movie.is_liked);
        assert!(movie.vote_average.is_none());
    }

    #[test]
    fn test_detail_parses_nested_reviews_and_osts() {
        let json = serde_json::json!({
            "id": 1,
            "tmdb_id": 496243,
            "title": "Parasite",
            "poster_path": "/p.jpg",
            "release_date": "2019-05-30",
            "is_liked": true,
            "reviews": [{
                "id": 7,
                "user": "mina",
                "content": "masterpiece",
                "created_at": "2024-05-01T12:00:00Z",
                "like_count": 3,
                "replies": [{
                    "id": 9,
                    "user": "joon",
                    "content": "agreed",
                    "created_at": "2024-05-01T13:00:00Z"
                }]
            }],
            "osts": [{"title": "Opening", "preview_url": null, "spotify_url": "https://open.spotify.com/track/x"}]
        });
        let detail: MovieDetail = serde_json::from_value(json).unwrap();
        assert_eq!(detail.reviews.len(), 1);
        assert_eq!(detail.reviews[0].replies[0].user, "joon");
        assert_eq!(detail.osts[0].title, "Opening");
        assert_eq!(
            detail.release_date,
            Some(NaiveDate::from_ymd_opt(2019, 5, 30).unwrap())
        );
    }

    #[test]
    fn test_like_status_parses() {
        let status: LikeStatus =
            serde_json::from_str(r#"{"liked": true, "like_count": 12}"#).unwrap();
        assert!(status.liked);
        assert_eq!(status.like_count, 12);
    }
}
