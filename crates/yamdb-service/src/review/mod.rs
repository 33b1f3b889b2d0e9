//! Reviews, their comments and the rating aggregate.

pub mod comment;
pub mod rating;
pub mod service;

pub use comment::CommentService;
pub use rating::average_score;
pub use service::ReviewService;
