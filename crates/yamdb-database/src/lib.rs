//! # yamdb-database
//!
//! The persistent store behind YaMDb. Services depend only on the repository
//! traits in [`traits`]; two backends implement them:
//!
//! - [`repositories`]: PostgreSQL via sqlx, uniqueness and cascades enforced
//!   by constraints in `migrations/`.
//! - [`memory`]: an in-process store with the same guarantees, used for tests
//!   and the `memory` provider.
//!
//! [`Repositories`] bundles one backend's implementations and is built from
//! [`DatabaseConfig`](yamdb_core::config::DatabaseConfig).

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod traits;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::Repositories;
pub use traits::{
    CommentRepository, NewTitle, ReviewRepository, TaxonomyRepository, TitleChanges,
    TitleRepository, UserRepository,
};
