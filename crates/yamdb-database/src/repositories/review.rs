//! Review repository backed by PostgreSQL.
//!
//! The `(author_id, title_id)` unique constraint makes duplicate inserts
//! fail atomically, so concurrent submissions race safely.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_entity::review::{CreateReview, Review, UpdateReview};

use super::{db_error, violated_constraint};
use crate::traits::ReviewRepository;

const SELECT_REVIEW: &str = "SELECT r.id, r.title_id, r.author_id, u.username AS author, \
            r.text, r.score, r.pub_date \
     FROM reviews r JOIN users u ON u.id = r.author_id";

/// Repository for reviews.
#[derive(Debug, Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn find(&self, title_id: Uuid, review_id: Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>(&format!(
            "{SELECT_REVIEW} WHERE r.id = $1 AND r.title_id = $2"
        ))
        .bind(review_id)
        .bind(title_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find review"))
    }

    async fn list_for_title(
        &self,
        title_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE title_id = $1")
            .bind(title_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count reviews"))?;

        let reviews = sqlx::query_as::<_, Review>(&format!(
            "{SELECT_REVIEW} WHERE r.title_id = $1 \
             ORDER BY r.pub_date DESC, r.id LIMIT $2 OFFSET $3"
        ))
        .bind(title_id)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list reviews"))?;

        Ok(PageResponse::new(reviews, page.page, page.page_size, total as u64))
    }

    async fn create(&self, data: &CreateReview) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "WITH inserted AS ( \
                 INSERT INTO reviews (id, title_id, author_id, text, score) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING * \
             ) \
             SELECT i.id, i.title_id, i.author_id, u.username AS author, \
                    i.text, i.score, i.pub_date \
             FROM inserted i JOIN users u ON u.id = i.author_id",
        )
        .bind(Uuid::new_v4())
        .bind(data.title_id)
        .bind(data.author_id)
        .bind(&data.text)
        .bind(data.score)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("reviews_author_title_key") => {
                AppError::conflict("You have already reviewed this title")
            }
            _ => db_error("Failed to create review")(e),
        })
    }

    async fn update(&self, id: Uuid, data: &UpdateReview) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "WITH updated AS ( \
                 UPDATE reviews SET text = COALESCE($2, text), score = COALESCE($3, score) \
                 WHERE id = $1 RETURNING * \
             ) \
             SELECT d.id, d.title_id, d.author_id, u.username AS author, \
                    d.text, d.score, d.pub_date \
             FROM updated d JOIN users u ON u.id = d.author_id",
        )
        .bind(id)
        .bind(data.text.as_deref())
        .bind(data.score)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update review"))?
        .ok_or_else(|| AppError::not_found(format!("Review {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete review"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn scores_for_title(&self, title_id: Uuid) -> AppResult<Vec<i16>> {
        sqlx::query_scalar::<_, i16>("SELECT score FROM reviews WHERE title_id = $1")
            .bind(title_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to load review scores"))
    }
}
