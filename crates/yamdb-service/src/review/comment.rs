//! Comments scoped to a review that must belong to the addressed title.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use yamdb_auth::policy::{Action, PolicyEnforcer, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_database::{CommentRepository, ReviewRepository};
use yamdb_entity::review::{Comment, CreateComment};

use crate::context::RequestContext;

/// Handles comment CRUD.
#[derive(Debug, Clone)]
pub struct CommentService {
    reviews: Arc<dyn ReviewRepository>,
    comments: Arc<dyn CommentRepository>,
    policy: Arc<PolicyEnforcer>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        comments: Arc<dyn CommentRepository>,
        policy: Arc<PolicyEnforcer>,
    ) -> Self {
        Self {
            reviews,
            comments,
            policy,
        }
    }

    /// Lists comments on a review of the given title.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        title_id: Uuid,
        review_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<Comment>, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Comment, Action::Read, None)?;
        self.ensure_review(title_id, review_id).await?;
        self.comments.list_for_review(review_id, page).await
    }

    /// Gets a comment. Fails with `NotFound` when the review is not under
    /// `title_id`.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        title_id: Uuid,
        review_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Comment, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Comment, Action::Read, None)?;
        self.find(title_id, review_id, comment_id).await
    }

    /// Adds the caller's comment to a review.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        title_id: Uuid,
        review_id: Uuid,
        text: String,
    ) -> Result<Comment, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Comment, Action::Create, None)?;
        let principal = ctx.principal()?;
        if text.trim().is_empty() {
            return Err(AppError::validation("text must not be empty"));
        }
        self.ensure_review(title_id, review_id).await?;

        let comment = self
            .comments
            .create(&CreateComment {
                review_id,
                author_id: principal.user_id,
                text,
            })
            .await?;
        info!(comment_id = %comment.id, review_id = %review_id, "Comment created");
        Ok(comment)
    }

    /// Replaces the comment text. `None` leaves the comment unchanged.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        title_id: Uuid,
        review_id: Uuid,
        comment_id: Uuid,
        text: Option<String>,
    ) -> Result<Comment, AppError> {
        ctx.principal()?;
        let comment = self.find(title_id, review_id, comment_id).await?;
        self.policy.authorize(
            &ctx.actor,
            ResourceKind::Comment,
            Action::Update,
            Some(comment.author_id),
        )?;
        let Some(text) = text else {
            return Ok(comment);
        };
        if text.trim().is_empty() {
            return Err(AppError::validation("text must not be empty"));
        }

        let updated = self.comments.update(comment.id, &text).await?;
        info!(comment_id = %updated.id, "Comment updated");
        Ok(updated)
    }

    /// Deletes a comment. Allowed for the author, moderators and admins.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        title_id: Uuid,
        review_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), AppError> {
        ctx.principal()?;
        let comment = self.find(title_id, review_id, comment_id).await?;
        self.policy.authorize(
            &ctx.actor,
            ResourceKind::Comment,
            Action::Delete,
            Some(comment.author_id),
        )?;
        self.comments.delete(comment.id).await?;
        info!(comment_id = %comment.id, "Comment deleted");
        Ok(())
    }

    async fn ensure_review(&self, title_id: Uuid, review_id: Uuid) -> Result<(), AppError> {
        match self.reviews.find(title_id, review_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Review {review_id} not found"))),
        }
    }

    async fn find(
        &self,
        title_id: Uuid,
        review_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Comment, AppError> {
        self.ensure_review(title_id, review_id).await?;
        self.comments
            .find(review_id, comment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Comment {comment_id} not found")))
    }
}
