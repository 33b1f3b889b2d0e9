//! Review entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use yamdb_core::{AppError, AppResult};

/// Lowest accepted score.
pub const MIN_SCORE: i16 = 1;
/// Highest accepted score.
pub const MAX_SCORE: i16 = 10;

/// A user's scored review of a title. One per (author, title).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    /// Row identifier.
    pub id: Uuid,
    /// Reviewed title.
    pub title_id: Uuid,
    /// Author user id.
    pub author_id: Uuid,
    /// Author username, joined in on read.
    pub author: String,
    /// Review body.
    pub text: String,
    /// Score in `1..=10`.
    pub score: i16,
    /// Publication timestamp.
    pub pub_date: DateTime<Utc>,
}

/// Data required to create a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    /// Reviewed title.
    pub title_id: Uuid,
    /// Author user id.
    pub author_id: Uuid,
    /// Review body.
    pub text: String,
    /// Score in `1..=10`.
    pub score: i16,
}

/// Partial review update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReview {
    /// New body.
    pub text: Option<String>,
    /// New score.
    pub score: Option<i16>,
}

/// Scores outside `1..=10` are rejected.
pub fn validate_score(score: i16) -> AppResult<()> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(AppError::validation(format!(
            "score must be between {MIN_SCORE} and {MAX_SCORE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_range() {
        assert!(validate_score(1).is_ok());
        assert!(validate_score(10).is_ok());
        assert!(validate_score(0).is_err());
        assert!(validate_score(11).is_err());
    }
}
