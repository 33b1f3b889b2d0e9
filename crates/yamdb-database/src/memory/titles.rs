use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_core::{AppError, AppResult};
use yamdb_entity::catalog::{Taxon, Title, TitleFilter};

use super::{MemoryStore, Tables, contains_ci, paginate};
use crate::traits::{NewTitle, TitleChanges, TitleRepository};

fn matches(tables: &Tables, filter: &TitleFilter, title: &Title) -> bool {
    if let Some(slug) = filter.category.as_deref() {
        let in_category = title
            .category_id
            .and_then(|id| tables.categories.get(&id))
            .is_some_and(|c| c.slug == slug);
        if !in_category {
            return false;
        }
    }
    if let Some(slug) = filter.genre.as_deref() {
        let tagged = tables
            .genre_titles
            .iter()
            .filter(|(t, _)| *t == title.id)
            .filter_map(|(_, g)| tables.genres.get(g))
            .any(|g| g.slug == slug);
        if !tagged {
            return false;
        }
    }
    let name_mismatch = filter
        .name
        .as_deref()
        .filter(|s| !s.is_empty())
        .is_some_and(|name| !contains_ci(&title.name, name));
    if name_mismatch {
        return false;
    }
    filter.year.is_none_or(|year| year == title.year)
}

fn link_genres(tables: &mut Tables, title_id: Uuid, genre_ids: &[Uuid]) -> AppResult<()> {
    if let Some(missing) = genre_ids.iter().find(|id| !tables.genres.contains_key(id)) {
        return Err(AppError::validation(format!("Genre {missing} does not exist")));
    }
    tables
        .genre_titles
        .extend(genre_ids.iter().map(|g| (title_id, *g)));
    Ok(())
}

fn ensure_category(tables: &Tables, category_id: Option<Uuid>) -> AppResult<()> {
    match category_id {
        Some(id) if !tables.categories.contains_key(&id) => Err(AppError::validation(format!(
            "Category {id} does not exist"
        ))),
        _ => Ok(()),
    }
}

#[async_trait]
impl TitleRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Title>> {
        Ok(self.tables.read().await.titles.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &TitleFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Title>> {
        let tables = self.tables.read().await;
        let mut titles: Vec<Title> = tables
            .titles
            .values()
            .filter(|t| matches(&tables, filter, t))
            .cloned()
            .collect();
        titles.sort_by(|a, b| a.name.cmp(&b.name).then(a.year.cmp(&b.year)));
        Ok(paginate(titles, page))
    }

    async fn create(&self, data: &NewTitle) -> AppResult<Title> {
        let mut tables = self.tables.write().await;
        ensure_category(&tables, data.category_id)?;

        let title = Title {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            year: data.year,
            description: data.description.clone(),
            category_id: data.category_id,
            created_at: Utc::now(),
        };
        link_genres(&mut tables, title.id, &data.genre_ids)?;
        tables.titles.insert(title.id, title.clone());
        Ok(title)
    }

    async fn update(&self, id: Uuid, data: &TitleChanges) -> AppResult<Title> {
        let mut tables = self.tables.write().await;
        if !tables.titles.contains_key(&id) {
            return Err(AppError::not_found(format!("Title {id} not found")));
        }
        ensure_category(&tables, data.category_id)?;

        if let Some(genre_ids) = &data.genre_ids {
            let previous: Vec<(Uuid, Uuid)> = tables
                .genre_titles
                .iter()
                .filter(|(t, _)| *t == id)
                .copied()
                .collect();
            tables.genre_titles.retain(|(t, _)| *t != id);
            if let Err(e) = link_genres(&mut tables, id, genre_ids) {
                tables.genre_titles.extend(previous);
                return Err(e);
            }
        }

        let title = tables
            .titles
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Title {id} not found")))?;
        if let Some(name) = &data.name {
            title.name = name.clone();
        }
        if let Some(year) = data.year {
            title.year = year;
        }
        if let Some(description) = &data.description {
            title.description = description.clone();
        }
        if let Some(category_id) = data.category_id {
            title.category_id = Some(category_id);
        }
        Ok(title.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tables.write().await.delete_title_cascade(id))
    }

    async fn genres(&self, title_id: Uuid) -> AppResult<Vec<Taxon>> {
        let tables = self.tables.read().await;
        let mut genres: Vec<Taxon> = tables
            .genre_titles
            .iter()
            .filter(|(t, _)| *t == title_id)
            .filter_map(|(_, g)| tables.genres.get(g).cloned())
            .collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }
}
