//! Title management and the nested read view.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use yamdb_auth::policy::{Action, PolicyEnforcer, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_database::{NewTitle, ReviewRepository, TaxonomyRepository, TitleChanges, TitleRepository};
use yamdb_entity::catalog::{
    CreateTitle, TaxonomyKind, Title, TitleFilter, TitleView, UpdateTitle, validate_year,
};

use super::validate_name;
use crate::context::RequestContext;
use crate::review::rating::average_score;

/// Handles titles. Reads embed taxonomy and the computed rating.
#[derive(Debug, Clone)]
pub struct TitleService {
    titles: Arc<dyn TitleRepository>,
    taxonomy: Arc<dyn TaxonomyRepository>,
    reviews: Arc<dyn ReviewRepository>,
    policy: Arc<PolicyEnforcer>,
}

impl TitleService {
    /// Creates a new title service.
    pub fn new(
        titles: Arc<dyn TitleRepository>,
        taxonomy: Arc<dyn TaxonomyRepository>,
        reviews: Arc<dyn ReviewRepository>,
        policy: Arc<PolicyEnforcer>,
    ) -> Self {
        Self {
            titles,
            taxonomy,
            reviews,
            policy,
        }
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &TitleFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<TitleView>, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Title, Action::Read, None)?;
        let page = self.titles.list(filter, page).await?;

        let mut views = Vec::with_capacity(page.items.len());
        for title in &page.items {
            views.push(self.view(title).await?);
        }
        Ok(page.with_items(views))
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<TitleView, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Title, Action::Read, None)?;
        let title = self.find(id).await?;
        self.view(&title).await
    }

    /// Category is required; every genre slug must resolve.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateTitle,
    ) -> Result<TitleView, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Title, Action::Create, None)?;
        validate_name(&data.name)?;
        validate_year(data.year)?;

        let category_slug = data
            .category
            .as_deref()
            .ok_or_else(|| AppError::validation("category is required"))?;
        let category_id = self.resolve(TaxonomyKind::Category, category_slug).await?;
        let genre_ids = self.resolve_all(TaxonomyKind::Genre, &data.genre).await?;

        let title = self
            .titles
            .create(&NewTitle {
                name: data.name,
                year: data.year,
                description: data.description,
                category_id: Some(category_id),
                genre_ids,
            })
            .await?;
        info!(title_id = %title.id, name = %title.name, "Title created");
        self.view(&title).await
    }

    /// Only provided fields change; a provided genre list replaces the set.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateTitle,
    ) -> Result<TitleView, AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Title, Action::Update, None)?;
        if let Some(name) = &data.name {
            validate_name(name)?;
        }
        if let Some(year) = data.year {
            validate_year(year)?;
        }
        self.find(id).await?;

        let category_id = match data.category.as_deref() {
            Some(slug) => Some(self.resolve(TaxonomyKind::Category, slug).await?),
            None => None,
        };
        let genre_ids = match &data.genre {
            Some(slugs) => Some(self.resolve_all(TaxonomyKind::Genre, slugs).await?),
            None => None,
        };

        let title = self
            .titles
            .update(
                id,
                &TitleChanges {
                    name: data.name,
                    year: data.year,
                    description: data.description,
                    category_id,
                    genre_ids,
                },
            )
            .await?;
        info!(title_id = %title.id, "Title updated");
        self.view(&title).await
    }

    /// Removes the title with its reviews and their comments.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.policy
            .authorize(&ctx.actor, ResourceKind::Title, Action::Delete, None)?;
        if !self.titles.delete(id).await? {
            return Err(AppError::not_found(format!("Title {id} not found")));
        }
        info!(title_id = %id, "Title deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Title, AppError> {
        self.titles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Title {id} not found")))
    }

    async fn resolve(&self, kind: TaxonomyKind, slug: &str) -> Result<Uuid, AppError> {
        self.taxonomy
            .find_by_slug(kind, slug)
            .await?
            .map(|t| t.id)
            .ok_or_else(|| AppError::validation(format!("No {kind} with slug '{slug}'")))
    }

    async fn resolve_all(&self, kind: TaxonomyKind, slugs: &[String]) -> Result<Vec<Uuid>, AppError> {
        let mut ids = Vec::with_capacity(slugs.len());
        for slug in slugs {
            let id = self.resolve(kind, slug).await?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    async fn view(&self, title: &Title) -> Result<TitleView, AppError> {
        let category = match title.category_id {
            Some(id) => self
                .taxonomy
                .find_by_id(TaxonomyKind::Category, id)
                .await?
                .map(|c| c.to_ref()),
            None => None,
        };
        let genre = self
            .titles
            .genres(title.id)
            .await?
            .iter()
            .map(|g| g.to_ref())
            .collect();
        let scores = self.reviews.scores_for_title(title.id).await?;

        Ok(TitleView {
            id: title.id,
            name: title.name.clone(),
            year: title.year,
            rating: average_score(&scores),
            description: title.description.clone(),
            genre,
            category,
        })
    }
}
