//! Categories and genres share one shape: a name plus a unique slug.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Which taxonomy a [`Taxon`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    /// A title has at most one category.
    Category,
    /// A title may carry many genres.
    Genre,
}

impl TaxonomyKind {
    /// Backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Genre => "genres",
        }
    }

    /// Name of the slug uniqueness constraint.
    pub fn slug_constraint(&self) -> &'static str {
        match self {
            Self::Category => "categories_slug_key",
            Self::Genre => "genres_slug_key",
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Genre => write!(f, "genre"),
        }
    }
}

/// A category or genre row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Taxon {
    /// Row identifier.
    pub id: Uuid,
    /// Display name, at most 256 characters.
    pub name: String,
    /// Unique URL key.
    pub slug: String,
}

impl Taxon {
    /// Public projection without the row id.
    pub fn to_ref(&self) -> TaxonRef {
        TaxonRef {
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// `{name, slug}` as embedded in title views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonRef {
    /// Display name.
    pub name: String,
    /// URL key.
    pub slug: String,
}

/// Data required to create a category or genre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaxon {
    /// Display name.
    pub name: String,
    /// Unique URL key.
    pub slug: String,
}

/// Partial update of a category or genre.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaxon {
    /// New display name.
    pub name: Option<String>,
    /// New URL key.
    pub slug: Option<String>,
}
