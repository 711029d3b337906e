//! Movie domain: catalog, likes, reviews and replies.

pub mod api;
pub mod model;

pub use api::MovieApi;
pub use model::{LikeStatus, Movie, MovieDetail, Ost, Review, ReviewReply};
