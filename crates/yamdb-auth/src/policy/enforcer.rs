//! Policy evaluation.

use uuid::Uuid;

use yamdb_core::error::AppError;

use super::actor::Actor;
use super::rules::{Action, PolicyTable, Requirement, ResourceKind};

/// Outcome of evaluating one request against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// No credentials where some were needed.
    Unauthenticated,
    /// Credentials present but insufficient.
    Forbidden,
}

/// Evaluates [`PolicyTable`] rules for an [`Actor`].
#[derive(Debug, Clone, Default)]
pub struct PolicyEnforcer {
    table: PolicyTable,
}

impl PolicyEnforcer {
    /// Enforcer over the default table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforcer over a custom table.
    pub fn with_table(table: PolicyTable) -> Self {
        Self { table }
    }

    /// Pure decision. `owner` is the author of the addressed resource.
    pub fn decide(
        &self,
        actor: &Actor,
        resource: ResourceKind,
        action: Action,
        owner: Option<Uuid>,
    ) -> Decision {
        let requirement = self.table.requirement(resource, action);
        if requirement == Requirement::Public {
            return Decision::Allow;
        }
        let Some(principal) = actor.principal() else {
            return Decision::Unauthenticated;
        };
        let allowed = match requirement {
            Requirement::Public | Requirement::Authenticated => true,
            Requirement::Admin => principal.is_admin(),
            Requirement::OwnerOrStaff => {
                owner == Some(principal.user_id) || principal.is_admin() || principal.is_moderator()
            }
        };
        if allowed {
            Decision::Allow
        } else {
            Decision::Forbidden
        }
    }

    /// [`decide`](Self::decide) mapped onto errors.
    pub fn authorize(
        &self,
        actor: &Actor,
        resource: ResourceKind,
        action: Action,
        owner: Option<Uuid>,
    ) -> Result<(), AppError> {
        match self.decide(actor, resource, action, owner) {
            Decision::Allow => Ok(()),
            Decision::Unauthenticated => Err(AppError::authentication(
                "Authentication credentials were not provided",
            )),
            Decision::Forbidden => Err(AppError::authorization(format!(
                "You do not have permission to {action} this resource"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use yamdb_core::error::ErrorKind;
    use yamdb_entity::user::UserRole;

    use super::*;
    use crate::policy::actor::Principal;

    fn actor(role: UserRole, is_superuser: bool) -> (Actor, Uuid) {
        let id = Uuid::new_v4();
        let principal = Principal {
            user_id: id,
            username: format!("{role}"),
            role,
            is_superuser,
        };
        (Actor::Authenticated(principal), id)
    }

    #[test]
    fn test_anonymous_may_read_but_not_write() {
        let enforcer = PolicyEnforcer::new();
        let anon = Actor::Anonymous;
        assert_eq!(
            enforcer.decide(&anon, ResourceKind::Title, Action::Read, None),
            Decision::Allow
        );
        assert_eq!(
            enforcer.decide(&anon, ResourceKind::Review, Action::Create, None),
            Decision::Unauthenticated
        );
    }

    #[test]
    fn test_only_admins_write_catalog() {
        let enforcer = PolicyEnforcer::new();
        let (user, _) = actor(UserRole::User, false);
        let (moderator, _) = actor(UserRole::Moderator, false);
        let (admin, _) = actor(UserRole::Admin, false);
        let (superuser, _) = actor(UserRole::User, true);

        for denied in [&user, &moderator] {
            let err = enforcer
                .authorize(denied, ResourceKind::Category, Action::Create, None)
                .unwrap_err();
            assert!(err.is(ErrorKind::Authorization));
        }
        for allowed in [&admin, &superuser] {
            assert!(enforcer
                .authorize(allowed, ResourceKind::Category, Action::Delete, None)
                .is_ok());
        }
    }

    #[test]
    fn test_review_owner_or_staff() {
        let enforcer = PolicyEnforcer::new();
        let (author, author_id) = actor(UserRole::User, false);
        let (stranger, _) = actor(UserRole::User, false);
        let (moderator, _) = actor(UserRole::Moderator, false);

        let owner = Some(author_id);
        assert_eq!(
            enforcer.decide(&author, ResourceKind::Review, Action::Delete, owner),
            Decision::Allow
        );
        assert_eq!(
            enforcer.decide(&stranger, ResourceKind::Review, Action::Delete, owner),
            Decision::Forbidden
        );
        assert_eq!(
            enforcer.decide(&moderator, ResourceKind::Comment, Action::Update, owner),
            Decision::Allow
        );
    }

    #[test]
    fn test_user_management_requires_admin_but_profile_does_not() {
        let enforcer = PolicyEnforcer::new();
        let (user, _) = actor(UserRole::User, false);
        assert_eq!(
            enforcer.decide(&user, ResourceKind::User, Action::Read, None),
            Decision::Forbidden
        );
        assert_eq!(
            enforcer.decide(&user, ResourceKind::OwnProfile, Action::Update, None),
            Decision::Allow
        );
    }

    #[test]
    fn test_custom_table_overrides_defaults() {
        let mut table = PolicyTable::new();
        table.set(ResourceKind::Title, Action::Read, Requirement::Authenticated);
        let enforcer = PolicyEnforcer::with_table(table);

        assert_eq!(
            enforcer.decide(&Actor::Anonymous, ResourceKind::Title, Action::Read, None),
            Decision::Unauthenticated
        );
        let (user, _) = actor(UserRole::User, false);
        assert_eq!(
            enforcer.decide(&user, ResourceKind::Title, Action::Read, None),
            Decision::Allow
        );
    }
}
