//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered YaMDb user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address; confirmation codes are sent here.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Free-form biography.
    pub bio: String,
    /// Application role.
    pub role: UserRole,
    /// Superusers are treated as admins regardless of `role`.
    pub is_superuser: bool,
    /// When the user was created.
    pub date_joined: DateTime<Utc>,
    /// Last successful code exchange.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Superuser or role `admin`.
    pub fn is_admin(&self) -> bool {
        self.is_superuser || self.role.is_admin()
    }

    /// Role `moderator`.
    pub fn is_moderator(&self) -> bool {
        self.role.is_moderator()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Biography.
    pub bio: String,
    /// Assigned role.
    pub role: UserRole,
}

impl CreateUser {
    /// A plain `user` role account with empty profile fields.
    pub fn basic(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Partial update of a user record. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New username.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
}

impl UpdateUser {
    /// Returns `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.role.is_none()
    }
}

/// Listing filter for the admin user list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    /// Exact role match.
    pub role: Option<UserRole>,
    /// Exact superuser flag match.
    pub is_superuser: Option<bool>,
    /// Case-insensitive substring over username, email, role and bio.
    pub search: Option<String>,
}

impl UserFilter {
    /// Check whether a user satisfies every set criterion.
    pub fn matches(&self, user: &User) -> bool {
        if self.role.is_some_and(|role| role != user.role) {
            return false;
        }
        if self.is_superuser.is_some_and(|flag| flag != user.is_superuser) {
            return false;
        }
        match self.search.as_deref() {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                [
                    user.username.as_str(),
                    user.email.as_str(),
                    user.role.as_str(),
                    user.bio.as_str(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, is_superuser: bool) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "reviewer".to_string(),
            email: "reviewer@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            bio: "Watches noir films".to_string(),
            role,
            is_superuser,
            date_joined: now,
            last_login_at: None,
            updated_at: now,
        }
    }

    #[test]
    fn test_admin_predicate() {
        assert!(user(UserRole::Admin, false).is_admin());
        assert!(user(UserRole::User, true).is_admin());
        assert!(!user(UserRole::Moderator, false).is_admin());
        assert!(user(UserRole::Moderator, false).is_moderator());
    }

    #[test]
    fn test_filter_search_covers_bio_and_role() {
        let u = user(UserRole::Moderator, false);
        let by_bio = UserFilter {
            search: Some("NOIR".to_string()),
            ..UserFilter::default()
        };
        assert!(by_bio.matches(&u));

        let by_role = UserFilter {
            search: Some("moder".to_string()),
            ..UserFilter::default()
        };
        assert!(by_role.matches(&u));

        let wrong_role = UserFilter {
            role: Some(UserRole::Admin),
            ..UserFilter::default()
        };
        assert!(!wrong_role.matches(&u));
    }
}
