//! Title entity, its read view and listing filter.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use yamdb_core::{AppError, AppResult};

use super::taxon::TaxonRef;

/// A catalog work (film, book, song...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Title {
    /// Row identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Release year, never in the future.
    pub year: i32,
    /// Optional synopsis.
    pub description: Option<String>,
    /// Owning category; cleared when the category is deleted.
    pub category_id: Option<Uuid>,
    /// When the title was created.
    pub created_at: DateTime<Utc>,
}

/// Read projection of a title with nested taxonomy and the review rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleView {
    /// Row identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Release year.
    pub year: i32,
    /// Mean review score, `None` until the first review.
    pub rating: Option<f64>,
    /// Optional synopsis.
    pub description: Option<String>,
    /// Linked genres.
    pub genre: Vec<TaxonRef>,
    /// Linked category.
    pub category: Option<TaxonRef>,
}

/// Data required to create a title. Taxonomy is referenced by slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTitle {
    /// Display name.
    pub name: String,
    /// Release year.
    pub year: i32,
    /// Optional synopsis.
    pub description: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    /// Genre slugs.
    pub genre: Vec<String>,
}

/// Partial title update. `genre: Some(..)` replaces the whole set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTitle {
    /// New name.
    pub name: Option<String>,
    /// New year.
    pub year: Option<i32>,
    /// New synopsis. `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New category slug.
    pub category: Option<String>,
    /// Replacement genre slugs.
    pub genre: Option<Vec<String>>,
}

/// Listing filter for titles. All criteria are combined with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleFilter {
    /// Exact category slug.
    pub category: Option<String>,
    /// Exact genre slug.
    pub genre: Option<String>,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Exact year.
    pub year: Option<i32>,
}

/// Reject years after the current calendar year.
pub fn validate_year(year: i32) -> AppResult<()> {
    let current = Utc::now().year();
    if year > current {
        return Err(AppError::validation(format!(
            "year {year} is in the future (current year is {current})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        let current = Utc::now().year();
        assert!(validate_year(current).is_ok());
        assert!(validate_year(1895).is_ok());
        assert!(validate_year(current + 1).is_err());
    }

    #[test]
    fn test_view_serializes_null_rating() {
        let view = TitleView {
            id: Uuid::nil(),
            name: "Stalker".to_string(),
            year: 1979,
            rating: None,
            description: None,
            genre: vec![],
            category: Some(TaxonRef {
                name: "Film".to_string(),
                slug: "film".to_string(),
            }),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["rating"].is_null());
        assert_eq!(json["category"]["slug"], "film");
    }
}
