//! The identity a request acts as.

use uuid::Uuid;

use yamdb_core::error::AppError;
use yamdb_entity::user::{User, UserRole};

/// An authenticated caller, resolved from the store on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub is_superuser: bool,
}

impl Principal {
    /// Superuser or role `admin`.
    pub fn is_admin(&self) -> bool {
        self.is_superuser || self.role.is_admin()
    }

    /// Role `moderator`.
    pub fn is_moderator(&self) -> bool {
        self.role.is_moderator()
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            is_superuser: user.is_superuser,
        }
    }
}

/// Either nobody or a resolved principal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Actor {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

impl Actor {
    /// The principal, when authenticated.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(principal) => Some(principal),
        }
    }

    /// The principal, or an authentication error.
    pub fn require_principal(&self) -> Result<&Principal, AppError> {
        self.principal().ok_or_else(|| {
            AppError::authentication("Authentication credentials were not provided")
        })
    }
}
