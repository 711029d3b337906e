//! Diary domain: dated personal entries, optionally linked to a movie and an
//! emotion.

pub mod api;
pub mod model;

pub use api::DiaryApi;
pub use model::{DiaryDraft, DiaryEntry};
