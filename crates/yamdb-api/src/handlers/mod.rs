//! Route handlers organized by domain.

pub mod auth;
pub mod comment;
pub mod health;
pub mod review;
pub mod taxonomy;
pub mod title;
pub mod user;
