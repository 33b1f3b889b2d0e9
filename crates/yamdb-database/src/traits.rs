//! Persistent store interfaces consumed by the service layer.
//!
//! Every implementation must enforce uniqueness of usernames, emails,
//! taxonomy slugs and `(author, title)` review pairs atomically with the
//! write, reporting violations as [`ErrorKind::Conflict`](yamdb_core::error::ErrorKind).

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use yamdb_core::AppResult;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_entity::catalog::{CreateTaxon, Taxon, TaxonomyKind, Title, TitleFilter, UpdateTaxon};
use yamdb_entity::review::{Comment, CreateComment, CreateReview, Review, UpdateReview};
use yamdb_entity::user::{CreateUser, UpdateUser, User, UserFilter};

/// Title insert with taxonomy already resolved to ids.
#[derive(Debug, Clone, Default)]
pub struct NewTitle {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub genre_ids: Vec<Uuid>,
}

/// Title patch with taxonomy already resolved to ids.
#[derive(Debug, Clone, Default)]
pub struct TitleChanges {
    pub name: Option<String>,
    pub year: Option<i32>,
    /// `Some(None)` clears the synopsis.
    pub description: Option<Option<String>>,
    pub category_id: Option<Uuid>,
    /// Replaces the whole genre set when present.
    pub genre_ids: Option<Vec<Uuid>>,
}

/// Identity store.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Exact, case-sensitive match.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Users ordered by username.
    async fn list(&self, filter: &UserFilter, page: &PageRequest)
    -> AppResult<PageResponse<User>>;

    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply the set fields. Fails with `NotFound` for an unknown id.
    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User>;

    /// Stamp a successful code exchange.
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()>;

    /// Delete the user together with their reviews and comments.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Categories and genres.
#[async_trait]
pub trait TaxonomyRepository: Send + Sync + Debug {
    /// Ordered by name; `search` matches name or slug case-insensitively.
    async fn list(
        &self,
        kind: TaxonomyKind,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Taxon>>;

    async fn find_by_slug(&self, kind: TaxonomyKind, slug: &str) -> AppResult<Option<Taxon>>;

    async fn find_by_id(&self, kind: TaxonomyKind, id: Uuid) -> AppResult<Option<Taxon>>;

    async fn create(&self, kind: TaxonomyKind, data: &CreateTaxon) -> AppResult<Taxon>;

    async fn update(&self, kind: TaxonomyKind, id: Uuid, data: &UpdateTaxon) -> AppResult<Taxon>;

    /// Titles survive: a deleted category is cleared, a deleted genre unlinked.
    async fn delete(&self, kind: TaxonomyKind, id: Uuid) -> AppResult<bool>;
}

/// Titles and their genre links.
#[async_trait]
pub trait TitleRepository: Send + Sync + Debug {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Title>>;

    /// Ordered by name.
    async fn list(&self, filter: &TitleFilter, page: &PageRequest)
    -> AppResult<PageResponse<Title>>;

    async fn create(&self, data: &NewTitle) -> AppResult<Title>;

    async fn update(&self, id: Uuid, data: &TitleChanges) -> AppResult<Title>;

    /// Cascades to reviews and their comments.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Genres linked to a title, ordered by name.
    async fn genres(&self, title_id: Uuid) -> AppResult<Vec<Taxon>>;
}

/// Reviews scoped to titles.
#[async_trait]
pub trait ReviewRepository: Send + Sync + Debug {
    /// A review only resolves under the title it belongs to.
    async fn find(&self, title_id: Uuid, review_id: Uuid) -> AppResult<Option<Review>>;

    /// Newest first.
    async fn list_for_title(
        &self,
        title_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>>;

    /// Fails with `Conflict` when the author already reviewed the title.
    async fn create(&self, data: &CreateReview) -> AppResult<Review>;

    async fn update(&self, id: Uuid, data: &UpdateReview) -> AppResult<Review>;

    /// Cascades to comments.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Every score recorded for a title.
    async fn scores_for_title(&self, title_id: Uuid) -> AppResult<Vec<i16>>;
}

/// Comments scoped to reviews.
#[async_trait]
pub trait CommentRepository: Send + Sync + Debug {
    async fn find(&self, review_id: Uuid, comment_id: Uuid) -> AppResult<Option<Comment>>;

    /// Oldest first.
    async fn list_for_review(
        &self,
        review_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Comment>>;

    async fn create(&self, data: &CreateComment) -> AppResult<Comment>;

    async fn update(&self, id: Uuid, text: &str) -> AppResult<Comment>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
