//! User domain entities.

pub mod model;
pub mod role;
pub mod username;

pub use model::{CreateUser, UpdateUser, User, UserFilter};
pub use role::UserRole;
pub use username::validate_username;
