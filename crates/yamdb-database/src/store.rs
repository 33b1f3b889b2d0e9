//! Backend selection.

use std::sync::Arc;

use tracing::info;

use yamdb_core::AppResult;
use yamdb_core::config::DatabaseConfig;
use yamdb_core::error::AppError;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{
    PgCommentRepository, PgReviewRepository, PgTaxonomyRepository, PgTitleRepository,
    PgUserRepository,
};
use crate::traits::{
    CommentRepository, ReviewRepository, TaxonomyRepository, TitleRepository, UserRepository,
};

#[derive(Debug, Clone)]
enum Backend {
    Postgres(DatabasePool),
    Memory,
}

/// One backend's implementation of every repository trait.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub taxonomy: Arc<dyn TaxonomyRepository>,
    pub titles: Arc<dyn TitleRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub comments: Arc<dyn CommentRepository>,
    backend: Backend,
}

impl Repositories {
    /// Build the backend named by `config.provider`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            "memory" => {
                info!("Using in-memory store; data is lost on shutdown");
                Ok(Self::memory(MemoryStore::new()))
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider '{other}'. Expected 'postgres' or 'memory'"
            ))),
        }
    }

    /// Repositories over a PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pg.clone())),
            taxonomy: Arc::new(PgTaxonomyRepository::new(pg.clone())),
            titles: Arc::new(PgTitleRepository::new(pg.clone())),
            reviews: Arc::new(PgReviewRepository::new(pg.clone())),
            comments: Arc::new(PgCommentRepository::new(pg)),
            backend: Backend::Postgres(pool),
        }
    }

    /// Repositories over a shared in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            taxonomy: Arc::new(store.clone()),
            titles: Arc::new(store.clone()),
            reviews: Arc::new(store.clone()),
            comments: Arc::new(store),
            backend: Backend::Memory,
        }
    }

    /// Backend name for health reporting.
    pub fn provider(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Check store connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.backend {
            Backend::Postgres(pool) => pool.health_check().await,
            Backend::Memory => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
        }
    }
}
