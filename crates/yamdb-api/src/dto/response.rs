//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use yamdb_auth::jwt::IssuedToken;
use yamdb_entity::catalog::Taxon;
use yamdb_entity::review::{Comment, Review};
use yamdb_entity::user::{User, UserRole};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Result of a successful code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}

/// Public user representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            role: user.role,
        }
    }
}

/// Category or genre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonResponse {
    pub name: String,
    pub slug: String,
}

impl From<Taxon> for TaxonResponse {
    fn from(taxon: Taxon) -> Self {
        Self {
            name: taxon.name,
            slug: taxon.slug,
        }
    }
}

/// Review with the author's username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            text: review.text,
            author: review.author,
            score: review.score,
            pub_date: review.pub_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author: comment.author,
            pub_date: comment.pub_date,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Store provider name.
    pub provider: String,
    /// `"connected"` or `"unreachable"`.
    pub database: String,
}
