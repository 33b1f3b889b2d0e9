//! Slug validation for categories and genres.

use yamdb_core::{AppError, AppResult};

/// Maximum slug length.
pub const MAX_SLUG_LEN: usize = 50;

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// A slug is 1..=50 characters from `[-a-zA-Z0-9_]`.
pub fn validate_slug(slug: &str) -> AppResult<()> {
    if slug.is_empty() {
        return Err(AppError::validation("slug must not be empty"));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(AppError::validation(format!(
            "slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !slug.chars().all(is_slug_char) {
        return Err(AppError::validation(
            "slug may only contain letters, digits, hyphens and underscores",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(validate_slug("film").is_ok());
        assert!(validate_slug("sci-fi_2").is_ok());
    }

    #[test]
    fn test_invalid_slugs() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("sci fi").is_err());
        assert!(validate_slug("драма").is_err());
        assert!(validate_slug(&"a".repeat(51)).is_err());
    }
}
