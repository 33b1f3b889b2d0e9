//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing and confirmation-code configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Secret key mixed into confirmation codes.
    #[serde(default = "default_confirmation_secret")]
    pub confirmation_secret: String,
    /// How long an issued confirmation code stays valid, in hours.
    #[serde(default = "default_code_ttl")]
    pub confirmation_code_ttl_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            confirmation_secret: default_confirmation_secret(),
            confirmation_code_ttl_hours: default_code_ttl(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    1440
}

fn default_confirmation_secret() -> String {
    "CHANGE_ME_TOO".to_string()
}

fn default_code_ttl() -> u64 {
    72
}
