//! Role policy: who may do what to which resource.

pub mod actor;
pub mod enforcer;
pub mod rules;

pub use actor::{Actor, Principal};
pub use enforcer::{Decision, PolicyEnforcer};
pub use rules::{Action, PolicyTable, Requirement, ResourceKind};
