use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_core::{AppError, AppResult};
use yamdb_entity::review::{CreateReview, Review, UpdateReview};

use super::{MemoryStore, paginate};
use crate::traits::ReviewRepository;

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn find(&self, title_id: Uuid, review_id: Uuid) -> AppResult<Option<Review>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .get(&review_id)
            .filter(|r| r.title_id == title_id)
            .map(|r| tables.review_view(r)))
    }

    async fn list_for_title(
        &self,
        title_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>> {
        let tables = self.tables.read().await;
        let mut reviews: Vec<Review> = tables
            .reviews
            .values()
            .filter(|r| r.title_id == title_id)
            .map(|r| tables.review_view(r))
            .collect();
        reviews.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(a.id.cmp(&b.id)));
        Ok(paginate(reviews, page))
    }

    async fn create(&self, data: &CreateReview) -> AppResult<Review> {
        let mut tables = self.tables.write().await;
        if !tables.titles.contains_key(&data.title_id) {
            return Err(AppError::not_found(format!("Title {} not found", data.title_id)));
        }
        if !tables.users.contains_key(&data.author_id) {
            return Err(AppError::not_found(format!("User {} not found", data.author_id)));
        }
        let duplicate = tables
            .reviews
            .values()
            .any(|r| r.title_id == data.title_id && r.author_id == data.author_id);
        if duplicate {
            return Err(AppError::conflict("You have already reviewed this title"));
        }

        let review = Review {
            id: Uuid::new_v4(),
            title_id: data.title_id,
            author_id: data.author_id,
            author: tables.username_of(data.author_id),
            text: data.text.clone(),
            score: data.score,
            pub_date: Utc::now(),
        };
        tables.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update(&self, id: Uuid, data: &UpdateReview) -> AppResult<Review> {
        let mut tables = self.tables.write().await;
        let review = tables
            .reviews
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Review {id} not found")))?;
        if let Some(text) = &data.text {
            review.text = text.clone();
        }
        if let Some(score) = data.score {
            review.score = score;
        }
        let updated = review.clone();
        Ok(tables.review_view(&updated))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tables.write().await.delete_review_cascade(id))
    }

    async fn scores_for_title(&self, title_id: Uuid) -> AppResult<Vec<i16>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .values()
            .filter(|r| r.title_id == title_id)
            .map(|r| r.score)
            .collect())
    }
}
