//! # yamdb-core
//!
//! Core crate for the YaMDb review service. Contains configuration schemas,
//! pagination types, the collaborator traits the service layer depends on,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other YaMDb crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
