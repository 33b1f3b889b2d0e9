//! Identity store operations: self profile and admin user management.

pub mod admin;
pub mod service;
pub mod validation;

pub use admin::AdminUserService;
pub use service::{ProfileChanges, UserService};
