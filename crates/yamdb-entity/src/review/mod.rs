//! Reviews and the comments attached to them.

pub mod comment;
pub mod model;

pub use comment::{Comment, CreateComment};
pub use model::{CreateReview, Review, UpdateReview, validate_score};
