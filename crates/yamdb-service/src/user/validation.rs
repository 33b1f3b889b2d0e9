//! Field rules shared by the self and admin user flows.

use validator::ValidateEmail;

use yamdb_core::error::AppError;
use yamdb_entity::user::{UpdateUser, validate_username};

/// Maximum email length.
pub const MAX_EMAIL_LEN: usize = 254;
/// Maximum first or last name length.
pub const MAX_NAME_LEN: usize = 150;
/// Maximum bio length.
pub const MAX_BIO_LEN: usize = 300;

/// Well-formed address no longer than 254 characters.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(AppError::validation(format!(
            "email must be at most {MAX_EMAIL_LEN} characters"
        )));
    }
    if !email.validate_email() {
        return Err(AppError::validation("Enter a valid email address"));
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Check every field an update would set.
pub fn validate_update(data: &UpdateUser) -> Result<(), AppError> {
    if let Some(username) = &data.username {
        validate_username(username)?;
    }
    if let Some(email) = &data.email {
        validate_email(email)?;
    }
    if let Some(first_name) = &data.first_name {
        max_len("first_name", first_name, MAX_NAME_LEN)?;
    }
    if let Some(last_name) = &data.last_name {
        max_len("last_name", last_name, MAX_NAME_LEN)?;
    }
    if let Some(bio) = &data.bio {
        max_len("bio", bio, MAX_BIO_LEN)?;
    }
    Ok(())
}
