//! Admin user management, addressed by username.

use std::sync::Arc;

use tracing::info;

use yamdb_auth::policy::{Action, PolicyEnforcer, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_database::UserRepository;
use yamdb_entity::user::{CreateUser, UpdateUser, User, UserFilter, validate_username};

use super::validation::{validate_email, validate_update};
use crate::context::RequestContext;

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    users: Arc<dyn UserRepository>,
    policy: Arc<PolicyEnforcer>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(users: Arc<dyn UserRepository>, policy: Arc<PolicyEnforcer>) -> Self {
        Self { users, policy }
    }

    /// Lists users with filters and pagination.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::User, Action::Read, None)?;
        self.users.list(filter, page).await
    }

    /// Creates a user with any role.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        data: CreateUser,
    ) -> Result<User, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::User, Action::Create, None)?;
        validate_username(&data.username)?;
        validate_email(&data.email)?;
        validate_update(&UpdateUser {
            first_name: Some(data.first_name.clone()),
            last_name: Some(data.last_name.clone()),
            bio: Some(data.bio.clone()),
            ..UpdateUser::default()
        })?;

        let user = self.users.create(&data).await?;
        info!(
            user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "User created by admin"
        );
        Ok(user)
    }

    /// Gets a user by username.
    pub async fn get_user(&self, ctx: &RequestContext, username: &str) -> Result<User, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::User, Action::Read, None)?;
        self.find(username).await
    }

    /// Updates any field of a user, including the role.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        username: &str,
        data: UpdateUser,
    ) -> Result<User, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::User, Action::Update, None)?;
        validate_update(&data)?;
        let user = self.find(username).await?;
        if data.is_empty() {
            return Ok(user);
        }

        let updated = self.users.update(user.id, &data).await?;
        info!(user_id = %updated.id, role = %updated.role, "User updated by admin");
        Ok(updated)
    }

    /// Deletes a user with their reviews and comments.
    pub async fn delete_user(&self, ctx: &RequestContext, username: &str) -> Result<(), AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::User, Action::Delete, None)?;
        let user = self.find(username).await?;
        self.users.delete(user.id).await?;
        info!(user_id = %user.id, username = %user.username, "User deleted by admin");
        Ok(())
    }

    async fn find(&self, username: &str) -> Result<User, AppError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }
}
