//! Comment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A comment on a review.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub review_id: Uuid,
    pub author_id: Uuid,
    /// Author username, joined in on read.
    pub author: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

/// Data required to create a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    pub review_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
}
