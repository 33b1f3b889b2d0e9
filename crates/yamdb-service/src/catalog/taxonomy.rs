//! Category and genre management, addressed by slug.

use std::sync::Arc;

use tracing::info;

use yamdb_auth::policy::{Action, PolicyEnforcer, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_database::TaxonomyRepository;
use yamdb_entity::catalog::{CreateTaxon, Taxon, TaxonomyKind, UpdateTaxon, validate_slug};

use super::validate_name;
use crate::context::RequestContext;

fn resource(kind: TaxonomyKind) -> ResourceKind {
    match kind {
        TaxonomyKind::Category => ResourceKind::Category,
        TaxonomyKind::Genre => ResourceKind::Genre,
    }
}

/// Handles both taxonomies; each call names the [`TaxonomyKind`].
#[derive(Debug, Clone)]
pub struct TaxonomyService {
    taxonomy: Arc<dyn TaxonomyRepository>,
    policy: Arc<PolicyEnforcer>,
}

impl TaxonomyService {
    /// Creates a new taxonomy service.
    pub fn new(taxonomy: Arc<dyn TaxonomyRepository>, policy: Arc<PolicyEnforcer>) -> Self {
        Self { taxonomy, policy }
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        kind: TaxonomyKind,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<PageResponse<Taxon>, AppError> {
        self.policy
            .authorize(&ctx.actor, resource(kind), Action::Read, None)?;
        self.taxonomy.list(kind, search, page).await
    }

    pub async fn get(
        &self,
        ctx: &RequestContext,
        kind: TaxonomyKind,
        slug: &str,
    ) -> Result<Taxon, AppError> {
        self.policy
            .authorize(&ctx.actor, resource(kind), Action::Read, None)?;
        self.find(kind, slug).await
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        kind: TaxonomyKind,
        data: CreateTaxon,
    ) -> Result<Taxon, AppError> {
        self.policy
            .authorize(&ctx.actor, resource(kind), Action::Create, None)?;
        validate_name(&data.name)?;
        validate_slug(&data.slug)?;

        let taxon = self.taxonomy.create(kind, &data).await?;
        info!(kind = %kind, slug = %taxon.slug, "Taxon created");
        Ok(taxon)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        kind: TaxonomyKind,
        slug: &str,
        data: UpdateTaxon,
    ) -> Result<Taxon, AppError> {
        self.policy
            .authorize(&ctx.actor, resource(kind), Action::Update, None)?;
        if let Some(name) = &data.name {
            validate_name(name)?;
        }
        if let Some(new_slug) = &data.slug {
            validate_slug(new_slug)?;
        }

        let existing = self.find(kind, slug).await?;
        let taxon = self.taxonomy.update(kind, existing.id, &data).await?;
        info!(kind = %kind, slug = %taxon.slug, "Taxon updated");
        Ok(taxon)
    }

    /// Titles survive; a deleted category is cleared from them.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        kind: TaxonomyKind,
        slug: &str,
    ) -> Result<(), AppError> {
        self.policy
            .authorize(&ctx.actor, resource(kind), Action::Delete, None)?;
        let existing = self.find(kind, slug).await?;
        self.taxonomy.delete(kind, existing.id).await?;
        info!(kind = %kind, slug = %slug, "Taxon deleted");
        Ok(())
    }

    async fn find(&self, kind: TaxonomyKind, slug: &str) -> Result<Taxon, AppError> {
        self.taxonomy
            .find_by_slug(kind, slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No {kind} with slug '{slug}'")))
    }
}
