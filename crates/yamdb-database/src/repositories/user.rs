//! User repository backed by PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_entity::user::{CreateUser, UpdateUser, User, UserFilter};

use super::{db_error, violated_constraint};
use crate::traits::UserRepository;

const FILTER_CLAUSE: &str = "($1::user_role IS NULL OR role = $1) \
     AND ($2::boolean IS NULL OR is_superuser = $2) \
     AND ($3::text IS NULL \
          OR username ILIKE '%' || $3 || '%' \
          OR email ILIKE '%' || $3 || '%' \
          OR role::text ILIKE '%' || $3 || '%' \
          OR bio ILIKE '%' || $3 || '%')";

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, context: &'static str) -> AppError {
    match violated_constraint(&e) {
        Some("users_username_key") => AppError::conflict("A user with that username already exists"),
        Some("users_email_key") => AppError::conflict("A user with that email already exists"),
        _ => db_error(context)(e),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by username"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by email"))
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let search = filter.search.as_deref().filter(|s| !s.is_empty());

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {FILTER_CLAUSE}"))
                .bind(filter.role)
                .bind(filter.is_superuser)
                .bind(search)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count users"))?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT * FROM users WHERE {FILTER_CLAUSE} ORDER BY username LIMIT $4 OFFSET $5"
        ))
        .bind(filter.role)
        .bind(filter.is_superuser)
        .bind(search)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list users"))?;

        Ok(PageResponse::new(users, page.page, page.page_size, total as u64))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, first_name, last_name, bio, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.bio)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create user"))
    }

    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET username = COALESCE($2, username), \
                              email = COALESCE($3, email), \
                              first_name = COALESCE($4, first_name), \
                              last_name = COALESCE($5, last_name), \
                              bio = COALESCE($6, bio), \
                              role = COALESCE($7, role), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.username.as_deref())
        .bind(data.email.as_deref())
        .bind(data.first_name.as_deref())
        .bind(data.last_name.as_deref())
        .bind(data.bio.as_deref())
        .bind(data.role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update user"))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to record login"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete user"))?;
        Ok(result.rows_affected() > 0)
    }
}
