use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_core::{AppError, AppResult};
use yamdb_entity::user::{CreateUser, UpdateUser, User, UserFilter};

use super::{MemoryStore, Tables, paginate};
use crate::traits::UserRepository;

fn ensure_unique(
    tables: &Tables,
    except: Option<Uuid>,
    username: Option<&str>,
    email: Option<&str>,
) -> AppResult<()> {
    let others = tables.users.values().filter(|u| Some(u.id) != except);
    for user in others {
        if username == Some(user.username.as_str()) {
            return Err(AppError::conflict("A user with that username already exists"));
        }
        if email == Some(user.email.as_str()) {
            return Err(AppError::conflict("A user with that email already exists"));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables
            .users
            .values()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(users, page))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        ensure_unique(&tables, None, Some(&data.username), Some(&data.email))?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            email: data.email.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            bio: data.bio.clone(),
            role: data.role,
            is_superuser: false,
            date_joined: now,
            last_login_at: None,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        ensure_unique(
            &tables,
            Some(id),
            data.username.as_deref(),
            data.email.as_deref(),
        )?;

        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        if let Some(username) = &data.username {
            user.username = username.clone();
        }
        if let Some(email) = &data.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &data.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &data.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(bio) = &data.bio {
            user.bio = bio.clone();
        }
        if let Some(role) = data.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.get_mut(&id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tables.write().await.delete_user_cascade(id))
    }
}
