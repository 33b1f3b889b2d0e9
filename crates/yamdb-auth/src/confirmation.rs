//! Confirmation codes.
//!
//! A code is `<issued_at>-<tag>` where `tag` is a truncated HMAC-SHA256 over
//! the user's id, email, last login and `issued_at`. Nothing is stored: a
//! code verifies while the bound user state is unchanged and the TTL has
//! not elapsed. Recording a login on successful exchange changes the state,
//! so each code works once.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use yamdb_core::config::AuthConfig;
use yamdb_core::error::AppError;
use yamdb_entity::user::User;

type HmacSha256 = Hmac<Sha256>;

/// Bytes of the HMAC output kept in a code.
const TAG_BYTES: usize = 10;

/// Allowed clock skew for codes stamped slightly in the future.
const FUTURE_SKEW_SECONDS: i64 = 60;

/// Derives and checks confirmation codes.
#[derive(Clone)]
pub struct ConfirmationCodes {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for ConfirmationCodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationCodes")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl ConfirmationCodes {
    /// Build from auth configuration. Fails when the TTL does not fit a
    /// `chrono::Duration`.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let hours = config.confirmation_code_ttl_hours;
        let ttl = i64::try_from(hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.confirmation_code_ttl_hours is out of range: {hours}"
                ))
            })?;
        Ok(Self {
            secret: config.confirmation_secret.as_bytes().to_vec(),
            ttl,
        })
    }

    fn mac(&self, user: &User, issued_at: i64) -> Result<HmacSha256, AppError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::internal(format!("Invalid confirmation secret: {e}")))?;
        let last_login = user
            .last_login_at
            .map(|t| t.timestamp_micros().to_string())
            .unwrap_or_default();
        mac.update(user.id.as_bytes());
        mac.update(b"|");
        mac.update(user.email.as_bytes());
        mac.update(b"|");
        mac.update(last_login.as_bytes());
        mac.update(b"|");
        mac.update(issued_at.to_string().as_bytes());
        Ok(mac)
    }

    /// Derive the code for `user` as of `now`.
    pub fn generate(&self, user: &User, now: DateTime<Utc>) -> Result<String, AppError> {
        let issued_at = now.timestamp();
        let tag = self.mac(user, issued_at)?.finalize().into_bytes();
        Ok(format!("{issued_at}-{}", hex::encode(&tag[..TAG_BYTES])))
    }

    /// Check `code` against the user's current state as of `now`.
    pub fn verify(&self, user: &User, code: &str, now: DateTime<Utc>) -> bool {
        let Some((stamp, tag_hex)) = code.split_once('-') else {
            return false;
        };
        let Ok(issued_at) = stamp.parse::<i64>() else {
            return false;
        };
        let age = now.timestamp() - issued_at;
        if age > self.ttl.num_seconds() || age < -FUTURE_SKEW_SECONDS {
            return false;
        }
        let Ok(tag) = hex::decode(tag_hex) else {
            return false;
        };
        if tag.len() != TAG_BYTES {
            return false;
        }
        match self.mac(user, issued_at) {
            Ok(mac) => mac.verify_truncated_left(&tag).is_ok(),
            Err(_) => false,
        }
    }
}
