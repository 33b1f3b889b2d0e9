//! Catalog entities: categories, genres and titles.

pub mod slug;
pub mod taxon;
pub mod title;

pub use slug::validate_slug;
pub use taxon::{CreateTaxon, Taxon, TaxonRef, TaxonomyKind, UpdateTaxon};
pub use title::{CreateTitle, Title, TitleFilter, TitleView, UpdateTitle, validate_year};
