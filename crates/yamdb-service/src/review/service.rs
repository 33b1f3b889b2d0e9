//! Reviews scoped to a title.
//!
//! One review per `(author, title)`; the store rejects a duplicate
//! atomically, so concurrent submissions yield exactly one success.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use yamdb_auth::policy::{Action, PolicyEnforcer, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_database::{ReviewRepository, TitleRepository};
use yamdb_entity::review::{CreateReview, Review, UpdateReview, validate_score};

use crate::context::RequestContext;

fn validate_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::validation("text must not be empty"));
    }
    Ok(())
}

/// Handles review CRUD.
#[derive(Debug, Clone)]
pub struct ReviewService {
    titles: Arc<dyn TitleRepository>,
    reviews: Arc<dyn ReviewRepository>,
    policy: Arc<PolicyEnforcer>,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(
        titles: Arc<dyn TitleRepository>,
        reviews: Arc<dyn ReviewRepository>,
        policy: Arc<PolicyEnforcer>,
    ) -> Self {
        Self {
            titles,
            reviews,
            policy,
        }
    }

    /// Lists reviews of a title, newest first. Fails with `NotFound` for an
    /// unknown title.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        title_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<Review>, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Review, Action::Read, None)?;
        self.ensure_title(title_id).await?;
        self.reviews.list_for_title(title_id, page).await
    }

    /// Gets a review that belongs to `title_id`.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        title_id: Uuid,
        review_id: Uuid,
    ) -> Result<Review, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Review, Action::Read, None)?;
        self.find(title_id, review_id).await
    }

    /// Creates the caller's review of a title. Fails with `Conflict` if the
    /// caller already reviewed it.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        title_id: Uuid,
        text: String,
        score: i16,
    ) -> Result<Review, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Review, Action::Create, None)?;
        let principal = ctx.principal()?;
        validate_text(&text)?;
        validate_score(score)?;
        self.ensure_title(title_id).await?;

        let review = self
            .reviews
            .create(&CreateReview {
                title_id,
                author_id: principal.user_id,
                text,
                score,
            })
            .await?;
        info!(
            review_id = %review.id,
            title_id = %title_id,
            author_id = %principal.user_id,
            score = review.score,
            "Review created"
        );
        Ok(review)
    }

    /// Updates text and score. Allowed for the author, moderators and admins.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        title_id: Uuid,
        review_id: Uuid,
        data: UpdateReview,
    ) -> Result<Review, AppError> {
        ctx.principal()?;
        let review = self.find(title_id, review_id).await?;
        self.policy.authorize(
            &ctx.actor,
            ResourceKind::Review,
            Action::Update,
            Some(review.author_id),
        )?;
        if let Some(text) = &data.text {
            validate_text(text)?;
        }
        if let Some(score) = data.score {
            validate_score(score)?;
        }

        let updated = self.reviews.update(review.id, &data).await?;
        info!(review_id = %updated.id, "Review updated");
        Ok(updated)
    }

    /// Deletes the review and its comments. Allowed for the author,
    /// moderators and admins.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        title_id: Uuid,
        review_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.principal()?;
        let review = self.find(title_id, review_id).await?;
        self.policy.authorize(
            &ctx.actor,
            ResourceKind::Review,
            Action::Delete,
            Some(review.author_id),
        )?;
        self.reviews.delete(review.id).await?;
        info!(review_id = %review.id, "Review deleted");
        Ok(())
    }

    async fn ensure_title(&self, title_id: Uuid) -> Result<(), AppError> {
        match self.titles.find_by_id(title_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Title {title_id} not found"))),
        }
    }

    async fn find(&self, title_id: Uuid, review_id: Uuid) -> Result<Review, AppError> {
        self.reviews
            .find(title_id, review_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Review {review_id} not found")))
    }
}
