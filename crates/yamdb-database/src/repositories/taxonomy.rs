//! Category and genre repository backed by PostgreSQL.
//!
//! Both taxonomies share a table shape, so queries are built per
//! [`TaxonomyKind`] from its static table name.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_entity::catalog::{CreateTaxon, Taxon, TaxonomyKind, UpdateTaxon};

use super::{db_error, violated_constraint};
use crate::traits::TaxonomyRepository;

const SEARCH_CLAUSE: &str = "($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR slug ILIKE '%' || $1 || '%')";

/// Repository for categories and genres.
#[derive(Debug, Clone)]
pub struct PgTaxonomyRepository {
    pool: PgPool,
}

impl PgTaxonomyRepository {
    /// Create a new taxonomy repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(kind: TaxonomyKind, e: sqlx::Error, context: &'static str) -> AppError {
    match violated_constraint(&e) {
        Some(name) if name == kind.slug_constraint() => {
            AppError::conflict(format!("A {kind} with that slug already exists"))
        }
        _ => db_error(context)(e),
    }
}

#[async_trait]
impl TaxonomyRepository for PgTaxonomyRepository {
    async fn list(
        &self,
        kind: TaxonomyKind,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Taxon>> {
        let table = kind.table();
        let search = search.filter(|s| !s.is_empty());

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {table} WHERE {SEARCH_CLAUSE}"
        ))
        .bind(search)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count taxonomy entries"))?;

        let items = sqlx::query_as::<_, Taxon>(&format!(
            "SELECT id, name, slug FROM {table} WHERE {SEARCH_CLAUSE} \
             ORDER BY name, slug LIMIT $2 OFFSET $3"
        ))
        .bind(search)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list taxonomy entries"))?;

        Ok(PageResponse::new(items, page.page, page.page_size, total as u64))
    }

    async fn find_by_slug(&self, kind: TaxonomyKind, slug: &str) -> AppResult<Option<Taxon>> {
        sqlx::query_as::<_, Taxon>(&format!(
            "SELECT id, name, slug FROM {} WHERE slug = $1",
            kind.table()
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find taxonomy entry by slug"))
    }

    async fn find_by_id(&self, kind: TaxonomyKind, id: Uuid) -> AppResult<Option<Taxon>> {
        sqlx::query_as::<_, Taxon>(&format!(
            "SELECT id, name, slug FROM {} WHERE id = $1",
            kind.table()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find taxonomy entry by id"))
    }

    async fn create(&self, kind: TaxonomyKind, data: &CreateTaxon) -> AppResult<Taxon> {
        sqlx::query_as::<_, Taxon>(&format!(
            "INSERT INTO {} (id, name, slug) VALUES ($1, $2, $3) RETURNING id, name, slug",
            kind.table()
        ))
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(kind, e, "Failed to create taxonomy entry"))
    }

    async fn update(&self, kind: TaxonomyKind, id: Uuid, data: &UpdateTaxon) -> AppResult<Taxon> {
        sqlx::query_as::<_, Taxon>(&format!(
            "UPDATE {} SET name = COALESCE($2, name), slug = COALESCE($3, slug) \
             WHERE id = $1 RETURNING id, name, slug",
            kind.table()
        ))
        .bind(id)
        .bind(data.name.as_deref())
        .bind(data.slug.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(kind, e, "Failed to update taxonomy entry"))?
        .ok_or_else(|| AppError::not_found(format!("No such {kind}")))
    }

    async fn delete(&self, kind: TaxonomyKind, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete taxonomy entry"))?;
        Ok(result.rows_affected() > 0)
    }
}
