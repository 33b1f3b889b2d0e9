//! In-process store implementing every repository trait.
//!
//! All tables sit behind one [`RwLock`], so a uniqueness check and the
//! insert that depends on it happen under the same write guard. Cascades
//! mirror the foreign keys declared in `migrations/`.

mod comments;
mod reviews;
mod taxonomy;
mod titles;
mod users;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use yamdb_core::types::{PageRequest, PageResponse};
use yamdb_entity::catalog::{Taxon, TaxonomyKind, Title};
use yamdb_entity::review::{Comment, Review};
use yamdb_entity::user::User;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Taxon>,
    genres: HashMap<Uuid, Taxon>,
    titles: HashMap<Uuid, Title>,
    /// `(title_id, genre_id)` links.
    genre_titles: BTreeSet<(Uuid, Uuid)>,
    reviews: HashMap<Uuid, Review>,
    comments: HashMap<Uuid, Comment>,
}

impl Tables {
    fn taxa(&self, kind: TaxonomyKind) -> &HashMap<Uuid, Taxon> {
        match kind {
            TaxonomyKind::Category => &self.categories,
            TaxonomyKind::Genre => &self.genres,
        }
    }

    fn taxa_mut(&mut self, kind: TaxonomyKind) -> &mut HashMap<Uuid, Taxon> {
        match kind {
            TaxonomyKind::Category => &mut self.categories,
            TaxonomyKind::Genre => &mut self.genres,
        }
    }

    fn username_of(&self, user_id: Uuid) -> String {
        self.users
            .get(&user_id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }

    /// Review with the author's current username.
    fn review_view(&self, review: &Review) -> Review {
        Review {
            author: self.username_of(review.author_id),
            ..review.clone()
        }
    }

    /// Comment with the author's current username.
    fn comment_view(&self, comment: &Comment) -> Comment {
        Comment {
            author: self.username_of(comment.author_id),
            ..comment.clone()
        }
    }

    fn delete_review_cascade(&mut self, review_id: Uuid) -> bool {
        let removed = self.reviews.remove(&review_id).is_some();
        if removed {
            self.comments.retain(|_, c| c.review_id != review_id);
        }
        removed
    }

    fn delete_title_cascade(&mut self, title_id: Uuid) -> bool {
        let removed = self.titles.remove(&title_id).is_some();
        if removed {
            self.genre_titles.retain(|(t, _)| *t != title_id);
            let review_ids: Vec<Uuid> = self
                .reviews
                .values()
                .filter(|r| r.title_id == title_id)
                .map(|r| r.id)
                .collect();
            for id in review_ids {
                self.delete_review_cascade(id);
            }
        }
        removed
    }

    fn delete_user_cascade(&mut self, user_id: Uuid) -> bool {
        let removed = self.users.remove(&user_id).is_some();
        if removed {
            self.comments.retain(|_, c| c.author_id != user_id);
            let review_ids: Vec<Uuid> = self
                .reviews
                .values()
                .filter(|r| r.author_id == user_id)
                .map(|r| r.id)
                .collect();
            for id in review_ids {
                self.delete_review_cascade(id);
            }
        }
        removed
    }
}

/// Shared in-memory store. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Slice an already ordered result set into a page.
fn paginate<T: Serialize>(items: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let slice = items
        .into_iter()
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
        .collect();
    PageResponse::new(slice, page.page, page.page_size, total)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests;
