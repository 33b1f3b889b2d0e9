//! Comment repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_entity::review::{Comment, CreateComment};

use super::db_error;
use crate::traits::CommentRepository;

const SELECT_COMMENT: &str = "SELECT c.id, c.review_id, c.author_id, u.username AS author, \
            c.text, c.pub_date \
     FROM comments c JOIN users u ON u.id = c.author_id";

/// Repository for review comments.
#[derive(Debug, Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn find(&self, review_id: Uuid, comment_id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>(&format!(
            "{SELECT_COMMENT} WHERE c.id = $1 AND c.review_id = $2"
        ))
        .bind(comment_id)
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find comment"))
    }

    async fn list_for_review(
        &self,
        review_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Comment>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE review_id = $1")
            .bind(review_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count comments"))?;

        let comments = sqlx::query_as::<_, Comment>(&format!(
            "{SELECT_COMMENT} WHERE c.review_id = $1 \
             ORDER BY c.pub_date, c.id LIMIT $2 OFFSET $3"
        ))
        .bind(review_id)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list comments"))?;

        Ok(PageResponse::new(comments, page.page, page.page_size, total as u64))
    }

    async fn create(&self, data: &CreateComment) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "WITH inserted AS ( \
                 INSERT INTO comments (id, review_id, author_id, text) \
                 VALUES ($1, $2, $3, $4) RETURNING * \
             ) \
             SELECT i.id, i.review_id, i.author_id, u.username AS author, i.text, i.pub_date \
             FROM inserted i JOIN users u ON u.id = i.author_id",
        )
        .bind(Uuid::new_v4())
        .bind(data.review_id)
        .bind(data.author_id)
        .bind(&data.text)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create comment"))
    }

    async fn update(&self, id: Uuid, text: &str) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "WITH updated AS ( \
                 UPDATE comments SET text = $2 WHERE id = $1 RETURNING * \
             ) \
             SELECT d.id, d.review_id, d.author_id, u.username AS author, d.text, d.pub_date \
             FROM updated d JOIN users u ON u.id = d.author_id",
        )
        .bind(id)
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update comment"))?
        .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete comment"))?;
        Ok(result.rows_affected() > 0)
    }
}
