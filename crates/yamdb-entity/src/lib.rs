//! # yamdb-entity
//!
//! Domain entity models for the YaMDb review service. Every struct in this
//! crate represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow` so the PostgreSQL repositories can map
//! rows directly.

pub mod catalog;
pub mod review;
pub mod user;
