//! PostgreSQL repository implementations.

pub mod comment;
pub mod review;
pub mod taxonomy;
pub mod title;
pub mod user;

pub use comment::PgCommentRepository;
pub use review::PgReviewRepository;
pub use taxonomy::PgTaxonomyRepository;
pub use title::PgTitleRepository;
pub use user::PgUserRepository;

use yamdb_core::error::{AppError, ErrorKind};

/// Name of the unique constraint a database error violated, if any.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => db_err.constraint(),
        _ => None,
    }
}

/// Wrap a sqlx error as a `Database` error with context.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}
