//! # yamdb-api
//!
//! HTTP API layer for YaMDb built on Axum.
//!
//! Exposes the review service under `/api/v1`: confirmation-code signup,
//! token exchange, user management, the catalog, and reviews with their
//! comments. Also holds the extractors, DTOs, middleware and the mapping
//! from `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
