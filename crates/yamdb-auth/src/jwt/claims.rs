//! JWT claims carried by access tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use yamdb_entity::user::UserRole;

/// Claims payload embedded in every access token.
///
/// `role` is informational; authorization always reloads the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the user ID).
    pub sub: Uuid,
    /// Username at issuance.
    pub username: String,
    /// Role at issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token identifier.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
