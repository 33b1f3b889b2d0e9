//! Title repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_entity::catalog::{Taxon, Title, TitleFilter};

use super::db_error;
use crate::traits::{NewTitle, TitleChanges, TitleRepository};

const FILTER_CLAUSE: &str = "($1::text IS NULL OR EXISTS ( \
         SELECT 1 FROM categories c WHERE c.id = t.category_id AND c.slug = $1)) \
     AND ($2::text IS NULL OR EXISTS ( \
         SELECT 1 FROM genre_titles gt JOIN genres g ON g.id = gt.genre_id \
         WHERE gt.title_id = t.id AND g.slug = $2)) \
     AND ($3::text IS NULL OR t.name ILIKE '%' || $3 || '%') \
     AND ($4::integer IS NULL OR t.year = $4)";

/// Repository for titles and their genre links.
#[derive(Debug, Clone)]
pub struct PgTitleRepository {
    pool: PgPool,
}

impl PgTitleRepository {
    /// Create a new title repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn link_genres(
    tx: &mut Transaction<'_, Postgres>,
    title_id: Uuid,
    genre_ids: &[Uuid],
) -> AppResult<()> {
    for genre_id in genre_ids {
        sqlx::query(
            "INSERT INTO genre_titles (title_id, genre_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(title_id)
        .bind(genre_id)
        .execute(&mut **tx)
        .await
        .map_err(db_error("Failed to link genre"))?;
    }
    Ok(())
}

#[async_trait]
impl TitleRepository for PgTitleRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Title>> {
        sqlx::query_as::<_, Title>("SELECT * FROM titles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find title"))
    }

    async fn list(
        &self,
        filter: &TitleFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Title>> {
        let name = filter.name.as_deref().filter(|s| !s.is_empty());

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM titles t WHERE {FILTER_CLAUSE}"
        ))
        .bind(filter.category.as_deref())
        .bind(filter.genre.as_deref())
        .bind(name)
        .bind(filter.year)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count titles"))?;

        let titles = sqlx::query_as::<_, Title>(&format!(
            "SELECT t.* FROM titles t WHERE {FILTER_CLAUSE} \
             ORDER BY t.name, t.year LIMIT $5 OFFSET $6"
        ))
        .bind(filter.category.as_deref())
        .bind(filter.genre.as_deref())
        .bind(name)
        .bind(filter.year)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list titles"))?;

        Ok(PageResponse::new(titles, page.page, page.page_size, total as u64))
    }

    async fn create(&self, data: &NewTitle) -> AppResult<Title> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let title = sqlx::query_as::<_, Title>(
            "INSERT INTO titles (id, name, year, description, category_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(data.year)
        .bind(data.description.as_deref())
        .bind(data.category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to create title"))?;

        link_genres(&mut tx, title.id, &data.genre_ids).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit title"))?;
        Ok(title)
    }

    async fn update(&self, id: Uuid, data: &TitleChanges) -> AppResult<Title> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let title = sqlx::query_as::<_, Title>(
            "UPDATE titles SET name = COALESCE($2, name), \
                               year = COALESCE($3, year), \
                               description = CASE WHEN $6 THEN $4 ELSE description END, \
                               category_id = COALESCE($5, category_id) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.name.as_deref())
        .bind(data.year)
        .bind(data.description.clone().flatten())
        .bind(data.category_id)
        .bind(data.description.is_some())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to update title"))?
        .ok_or_else(|| AppError::not_found(format!("Title {id} not found")))?;

        if let Some(genre_ids) = &data.genre_ids {
            sqlx::query("DELETE FROM genre_titles WHERE title_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to clear genres"))?;
            link_genres(&mut tx, id, genre_ids).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit title"))?;
        Ok(title)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete title"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn genres(&self, title_id: Uuid) -> AppResult<Vec<Taxon>> {
        sqlx::query_as::<_, Taxon>(
            "SELECT g.id, g.name, g.slug FROM genres g \
             JOIN genre_titles gt ON gt.genre_id = g.id \
             WHERE gt.title_id = $1 ORDER BY g.name",
        )
        .bind(title_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load title genres"))
    }
}
