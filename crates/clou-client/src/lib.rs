//! HTTP transport and resource clients for the clou backend.
//!
//! One client struct per backend resource, all sharing a single
//! [`HttpClient`] adapter that owns token injection and error
//! normalization.

pub mod auth_client;
pub mod diary_client;
pub mod emotion_client;
pub mod http;
pub mod movie_client;

pub use auth_client::AuthClient;
pub use diary_client::DiaryClient;
pub use emotion_client::EmotionClient;
pub use http::HttpClient;
pub use movie_client::MovieClient;
