//! # yamdb-auth
//!
//! Authentication and authorization primitives for YaMDb.
//!
//! ## Modules
//!
//! - `jwt`: bearer token issuance and validation
//! - `confirmation`: keyed-hash confirmation codes bound to user state
//! - `policy`: the role policy table and its enforcer

pub mod confirmation;
pub mod jwt;
pub mod policy;

pub use confirmation::ConfirmationCodes;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use policy::{Action, Actor, PolicyEnforcer, PolicyTable, Principal, ResourceKind};
