//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use yamdb_entity::catalog::{CreateTaxon, CreateTitle, TitleFilter, UpdateTaxon, UpdateTitle};
use yamdb_entity::review::UpdateReview;
use yamdb_entity::user::{CreateUser, UpdateUser, UserFilter, UserRole};
use yamdb_service::ProfileChanges;

/// Confirmation-code request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,
    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,
}

/// Code exchange body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Confirmation code is required"))]
    pub confirmation_code: String,
}

/// Admin user creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 300))]
    pub bio: String,
    #[serde(default)]
    pub role: UserRole,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            role: req.role,
        }
    }
}

/// Partial user update. `role` is honoured for admins and dropped on
/// `/users/me`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    #[validate(length(max = 300))]
    pub bio: Option<String>,
    pub role: Option<UserRole>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            role: req.role,
        }
    }
}

impl From<UpdateUserRequest> for ProfileChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
        }
    }
}

/// `GET /users` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
    pub is_superuser: Option<bool>,
    pub search: Option<String>,
}

impl From<UserListQuery> for UserFilter {
    fn from(q: UserListQuery) -> Self {
        Self {
            role: q.role,
            is_superuser: q.is_superuser,
            search: q.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Category or genre creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaxonRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub slug: String,
}

impl From<TaxonRequest> for CreateTaxon {
    fn from(req: TaxonRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTaxonRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub slug: Option<String>,
}

impl From<UpdateTaxonRequest> for UpdateTaxon {
    fn from(req: UpdateTaxonRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
        }
    }
}

/// `?search=` for category and genre listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Title creation. Category and genres are referenced by slug.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTitleRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

impl From<CreateTitleRequest> for CreateTitle {
    fn from(req: CreateTitleRequest) -> Self {
        Self {
            name: req.name,
            year: req.year,
            description: req.description,
            category: req.category,
            genre: req.genre,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTitleRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    pub year: Option<i32>,
    /// Absent leaves the synopsis untouched; `null` clears it.
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub genre: Option<Vec<String>>,
}

impl From<UpdateTitleRequest> for UpdateTitle {
    fn from(req: UpdateTitleRequest) -> Self {
        Self {
            name: req.name,
            year: req.year,
            description: req.description,
            category: req.category,
            genre: req.genre,
        }
    }
}

/// `GET /titles` filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleListQuery {
    pub category: Option<String>,
    pub genre: Option<String>,
    pub name: Option<String>,
    pub year: Option<i32>,
}

impl From<TitleListQuery> for TitleFilter {
    fn from(q: TitleListQuery) -> Self {
        Self {
            category: q.category,
            genre: q.genre,
            name: q.name,
            year: q.year,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, message = "Review text is required"))]
    pub text: String,
    #[validate(range(min = 1, max = 10, message = "Score must be between 1 and 10"))]
    pub score: i16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(min = 1))]
    pub text: Option<String>,
    #[validate(range(min = 1, max = 10, message = "Score must be between 1 and 10"))]
    pub score: Option<i16>,
}

impl From<UpdateReviewRequest> for UpdateReview {
    fn from(req: UpdateReviewRequest) -> Self {
        Self {
            text: req.text,
            score: req.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, message = "Comment text is required"))]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1))]
    pub text: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field,
/// which `#[serde(default)]` leaves as `None`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
