//! Username validation.

use yamdb_core::{AppError, AppResult};

/// Maximum username length.
pub const MAX_USERNAME_LEN: usize = 150;

/// Reserved because `/users/me` addresses the caller's own profile.
pub const RESERVED_USERNAME: &str = "me";

fn is_username_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '@' | '+' | '-')
}

/// Check that a username is non-empty, within length, uses only
/// letters, digits and `_ . @ + -`, and is not the reserved word.
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.is_empty() {
        return Err(AppError::validation("username must not be empty"));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if !username.chars().all(is_username_char) {
        return Err(AppError::validation(
            "username may only contain letters, digits and @/./+/-/_",
        ));
    }
    if username == RESERVED_USERNAME {
        return Err(AppError::validation(format!(
            "username '{RESERVED_USERNAME}' is reserved"
        )));
    }
    Ok(())
}
