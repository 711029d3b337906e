pub mod auth;
pub mod config;
pub mod diary;
pub mod emotion;
pub mod error;
pub mod movie;
pub mod route;

// Re-export common error type
pub use error::{ClouError, Result};
