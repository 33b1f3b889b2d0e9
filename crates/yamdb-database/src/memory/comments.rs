use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_core::{AppError, AppResult};
use yamdb_entity::review::{Comment, CreateComment};

use super::{MemoryStore, paginate};
use crate::traits::CommentRepository;

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find(&self, review_id: Uuid, comment_id: Uuid) -> AppResult<Option<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .get(&comment_id)
            .filter(|c| c.review_id == review_id)
            .map(|c| tables.comment_view(c)))
    }

    async fn list_for_review(
        &self,
        review_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Comment>> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.review_id == review_id)
            .map(|c| tables.comment_view(c))
            .collect();
        comments.sort_by(|a, b| a.pub_date.cmp(&b.pub_date).then(a.id.cmp(&b.id)));
        Ok(paginate(comments, page))
    }

    async fn create(&self, data: &CreateComment) -> AppResult<Comment> {
        let mut tables = self.tables.write().await;
        if !tables.reviews.contains_key(&data.review_id) {
            return Err(AppError::not_found(format!("Review {} not found", data.review_id)));
        }
        if !tables.users.contains_key(&data.author_id) {
            return Err(AppError::not_found(format!("User {} not found", data.author_id)));
        }
        let comment = Comment {
            id: Uuid::new_v4(),
            review_id: data.review_id,
            author_id: data.author_id,
            author: tables.username_of(data.author_id),
            text: data.text.clone(),
            pub_date: Utc::now(),
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, id: Uuid, text: &str) -> AppResult<Comment> {
        let mut tables = self.tables.write().await;
        let comment = tables
            .comments
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))?;
        comment.text = text.to_string();
        let updated = comment.clone();
        Ok(tables.comment_view(&updated))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }
}
