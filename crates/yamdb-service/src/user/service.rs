//! Self-service profile operations behind `/users/me`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use yamdb_auth::policy::{Action, PolicyEnforcer, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_database::UserRepository;
use yamdb_entity::user::{UpdateUser, User};

use super::validation::validate_update;
use crate::context::RequestContext;

/// Fields a user may change on their own record. `role` is absent on purpose:
/// a self-update can never change it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

impl From<ProfileChanges> for UpdateUser {
    fn from(changes: ProfileChanges) -> Self {
        Self {
            username: changes.username,
            email: changes.email,
            first_name: changes.first_name,
            last_name: changes.last_name,
            bio: changes.bio,
            role: None,
        }
    }
}

/// Handles the caller's own profile.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    policy: Arc<PolicyEnforcer>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserRepository>, policy: Arc<PolicyEnforcer>) -> Self {
        Self { users, policy }
    }

    /// The caller's full record.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::OwnProfile, Action::Read, None)?;
        let principal = ctx.principal()?;
        self.users
            .find_by_id(principal.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Apply profile changes to the caller's record.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        changes: ProfileChanges,
    ) -> Result<User, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::OwnProfile, Action::Update, None)?;
        let principal = ctx.principal()?;

        let update = UpdateUser::from(changes);
        validate_update(&update)?;
        if update.is_empty() {
            return self.get_profile(ctx).await;
        }

        let user = self.users.update(principal.user_id, &update).await?;
        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Remove the caller's account with their reviews and comments.
    pub async fn delete_profile(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::OwnProfile, Action::Delete, None)?;
        let principal = ctx.principal()?;

        if !self.users.delete(principal.user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %principal.user_id, "User deleted own account");
        Ok(())
    }
}
