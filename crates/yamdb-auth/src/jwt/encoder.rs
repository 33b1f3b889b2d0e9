//! Access token issuance.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use yamdb_core::config::AuthConfig;
use yamdb_core::error::AppError;
use yamdb_entity::user::User;

use super::claims::Claims;

/// Creates signed HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish()
    }
}

/// A freshly signed access token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let minutes = config.jwt_access_ttl_minutes;
        let access_ttl = i64::try_from(minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.jwt_access_ttl_minutes is out of range: {minutes}"
                ))
            })?;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl,
        })
    }

    /// Signs an access token for `user`.
    pub fn issue_access_token(&self, user: &User) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.access_ttl)
            .ok_or_else(|| AppError::configuration("Access token expiry is out of range"))?;

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
