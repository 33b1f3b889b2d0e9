//! # yamdb-service
//!
//! Use-case layer for YaMDb. Each service takes a [`RequestContext`],
//! checks the role policy, validates input and drives the repositories.
//!
//! Services follow constructor injection: repositories, the policy enforcer
//! and collaborators are handed in as `Arc`s at construction time.

pub mod auth;
pub mod catalog;
pub mod context;
pub mod notification;
pub mod review;
pub mod user;


pub use auth::{AuthService, SignupEcho};
pub use catalog::{TaxonomyService, TitleService};
pub use context::RequestContext;
pub use notification::{FileNotifier, LogNotifier, build_notifier};
pub use review::{CommentService, ReviewService};
pub use user::{AdminUserService, ProfileChanges, UserService};
