use async_trait::async_trait;
use uuid::Uuid;

use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_core::{AppError, AppResult};
use yamdb_entity::catalog::{CreateTaxon, Taxon, TaxonomyKind, UpdateTaxon};

use super::{MemoryStore, contains_ci, paginate};
use crate::traits::TaxonomyRepository;

fn slug_conflict(kind: TaxonomyKind) -> AppError {
    AppError::conflict(format!("A {kind} with that slug already exists"))
}

#[async_trait]
impl TaxonomyRepository for MemoryStore {
    async fn list(
        &self,
        kind: TaxonomyKind,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Taxon>> {
        let tables = self.tables.read().await;
        let search = search.filter(|s| !s.is_empty());
        let mut items: Vec<Taxon> = tables
            .taxa(kind)
            .values()
            .filter(|t| search.is_none_or(|q| contains_ci(&t.name, q) || contains_ci(&t.slug, q)))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
        Ok(paginate(items, page))
    }

    async fn find_by_slug(&self, kind: TaxonomyKind, slug: &str) -> AppResult<Option<Taxon>> {
        let tables = self.tables.read().await;
        Ok(tables.taxa(kind).values().find(|t| t.slug == slug).cloned())
    }

    async fn find_by_id(&self, kind: TaxonomyKind, id: Uuid) -> AppResult<Option<Taxon>> {
        Ok(self.tables.read().await.taxa(kind).get(&id).cloned())
    }

    async fn create(&self, kind: TaxonomyKind, data: &CreateTaxon) -> AppResult<Taxon> {
        let mut tables = self.tables.write().await;
        let taxa = tables.taxa_mut(kind);
        if taxa.values().any(|t| t.slug == data.slug) {
            return Err(slug_conflict(kind));
        }
        let taxon = Taxon {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            slug: data.slug.clone(),
        };
        taxa.insert(taxon.id, taxon.clone());
        Ok(taxon)
    }

    async fn update(&self, kind: TaxonomyKind, id: Uuid, data: &UpdateTaxon) -> AppResult<Taxon> {
        let mut tables = self.tables.write().await;
        let taxa = tables.taxa_mut(kind);
        let clashes = data
            .slug
            .as_ref()
            .is_some_and(|slug| taxa.values().any(|t| t.id != id && &t.slug == slug));
        if clashes {
            return Err(slug_conflict(kind));
        }
        let taxon = taxa
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("No such {kind}")))?;
        if let Some(name) = &data.name {
            taxon.name = name.clone();
        }
        if let Some(slug) = &data.slug {
            taxon.slug = slug.clone();
        }
        Ok(taxon.clone())
    }

    async fn delete(&self, kind: TaxonomyKind, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.taxa_mut(kind).remove(&id).is_none() {
            return Ok(false);
        }
        match kind {
            TaxonomyKind::Category => {
                for title in tables.titles.values_mut() {
                    if title.category_id == Some(id) {
                        title.category_id = None;
                    }
                }
            }
            TaxonomyKind::Genre => tables.genre_titles.retain(|(_, g)| *g != id),
        }
        Ok(true)
    }
}
