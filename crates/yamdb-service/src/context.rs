//! Request context carrying the acting identity.

use uuid::Uuid;

use yamdb_auth::policy::{Actor, Principal};
use yamdb_core::error::AppError;

/// Context for the current request.
///
/// Built by the HTTP layer and passed into every service method, so each
/// operation knows *who* is acting without ambient lookups.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The acting identity.
    pub actor: Actor,
    /// Correlation id for logs.
    pub request_id: Uuid,
}

impl RequestContext {
    /// Creates a context for `actor`.
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            request_id: Uuid::new_v4(),
        }
    }

    /// Context for an unauthenticated caller.
    pub fn anonymous() -> Self {
        Self::new(Actor::Anonymous)
    }

    /// Context for an authenticated caller.
    pub fn authenticated(principal: Principal) -> Self {
        Self::new(Actor::Authenticated(principal))
    }

    /// The caller, or an authentication error.
    pub fn principal(&self) -> Result<&Principal, AppError> {
        self.actor.require_principal()
    }
}
