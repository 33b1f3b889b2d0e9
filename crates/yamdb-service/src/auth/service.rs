//! The confirmation-code authenticator.
//!
//! `request_code` get-or-creates the user for an exact `(username, email)`
//! pair and mails a code; `exchange_code` trades a valid code for an access
//! token. Exchange failures never reveal whether the username exists.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use yamdb_auth::confirmation::ConfirmationCodes;
use yamdb_auth::jwt::{IssuedToken, JwtEncoder};
use yamdb_core::error::AppError;
use yamdb_core::traits::{Notifier, OutgoingMail};
use yamdb_database::UserRepository;
use yamdb_entity::user::{CreateUser, User, validate_username};

use crate::user::validation::validate_email;

/// Message used for every failed exchange.
pub const INVALID_CODE: &str = "invalid code";

/// The validated pair echoed back after a code request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupEcho {
    pub username: String,
    pub email: String,
}

/// Issues confirmation codes and exchanges them for tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    codes: ConfirmationCodes,
    encoder: JwtEncoder,
    notifier: Arc<dyn Notifier>,
    subject: String,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        codes: ConfirmationCodes,
        encoder: JwtEncoder,
        notifier: Arc<dyn Notifier>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            users,
            codes,
            encoder,
            notifier,
            subject: subject.into(),
        }
    }

    /// Get-or-create the user for this exact pair and mail a fresh code.
    ///
    /// A username registered with another email, or an email registered
    /// under another username, is a conflict. Repeating an identical pair
    /// simply sends a new code.
    pub async fn request_code(&self, username: &str, email: &str) -> Result<SignupEcho, AppError> {
        validate_username(username)?;
        validate_email(email)?;

        let user = self.get_or_create(username, email).await?;
        let code = self.codes.generate(&user, Utc::now())?;

        let mail = OutgoingMail {
            recipient: user.email.clone(),
            subject: self.subject.clone(),
            body: format!("Your confirmation code: {code}"),
        };
        self.notifier.send(&mail).await.map_err(|e| {
            warn!(user_id = %user.id, error = %e, "Confirmation mail delivery failed");
            e
        })?;

        info!(user_id = %user.id, "Confirmation code issued");
        Ok(SignupEcho {
            username: user.username,
            email: user.email,
        })
    }

    /// Exchange a confirmation code for an access token.
    pub async fn exchange_code(&self, username: &str, code: &str) -> Result<IssuedToken, AppError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            warn!(username = %username, "Code exchange for unknown username");
            return Err(AppError::validation(INVALID_CODE));
        };

        let now = Utc::now();
        if !self.codes.verify(&user, code, now) {
            warn!(user_id = %user.id, "Rejected confirmation code");
            return Err(AppError::validation(INVALID_CODE));
        }

        self.users.record_login(user.id, now).await?;
        let token = self.encoder.issue_access_token(&user)?;
        info!(user_id = %user.id, "Access token issued");
        Ok(token)
    }

    async fn get_or_create(&self, username: &str, email: &str) -> Result<User, AppError> {
        let by_username = self.users.find_by_username(username).await?;
        let by_email = self.users.find_by_email(email).await?;

        if by_username.as_ref().is_some_and(|u| u.email != email) {
            return Err(AppError::conflict(
                "This username is already registered with a different email",
            ));
        }
        if by_email.as_ref().is_some_and(|u| u.username != username) {
            return Err(AppError::conflict(
                "This email is already registered with a different username",
            ));
        }

        match by_username {
            Some(user) => Ok(user),
            None => {
                let user = self.users.create(&CreateUser::basic(username, email)).await?;
                info!(user_id = %user.id, username = %user.username, "User signed up");
                Ok(user)
            }
        }
    }
}
