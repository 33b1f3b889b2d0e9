//! Categories, genres and titles.

pub mod taxonomy;
pub mod title;

pub use taxonomy::TaxonomyService;
pub use title::TitleService;

use yamdb_core::error::AppError;

/// Maximum name length for taxa and titles.
pub const MAX_NAME_LEN: usize = 256;

pub(crate) fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}
