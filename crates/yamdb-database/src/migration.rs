//! Schema migrations embedded from `migrations/` at the workspace root.

use sqlx::PgPool;
use tracing::info;

use yamdb_core::error::{AppError, ErrorKind};

/// Apply pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(
        available = migrator.iter().count(),
        "Applying database migrations"
    );

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database schema is up to date");
    Ok(())
}
