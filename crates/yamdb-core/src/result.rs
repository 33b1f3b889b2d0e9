//! Convenience result type alias for YaMDb.

use crate::error::AppError;

/// A specialized `Result` type for YaMDb operations.
pub type AppResult<T> = Result<T, AppError>;
