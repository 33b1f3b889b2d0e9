//! Core type definitions used across the YaMDb workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
