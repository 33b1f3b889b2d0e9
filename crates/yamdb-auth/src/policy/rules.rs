//! The policy table.
//!
//! Each `(resource, action)` pair maps to one [`Requirement`]. Pairs missing
//! from the table require an admin.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Resource families the policy distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Any user record addressed by username, and the user list.
    User,
    /// The caller's own record (`/users/me`).
    OwnProfile,
    Category,
    Genre,
    Title,
    Review,
    Comment,
}

/// Operations on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// What an actor must satisfy for an action to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Anyone, including anonymous callers.
    Public,
    /// Any authenticated user.
    Authenticated,
    /// Admins (role admin or superuser).
    Admin,
    /// The resource author, a moderator or an admin.
    OwnerOrStaff,
}

/// `(resource, action) → requirement` lookup.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    rules: HashMap<(ResourceKind, Action), Requirement>,
}

impl PolicyTable {
    /// The YaMDb default rules.
    pub fn new() -> Self {
        use Action::*;
        use Requirement::*;
        use ResourceKind as R;

        let mut table = Self::empty();
        for action in [Read, Create, Update, Delete] {
            table.set(R::User, action, Admin);
        }
        for action in [Read, Update, Delete] {
            table.set(R::OwnProfile, action, Authenticated);
        }
        for resource in [R::Category, R::Genre, R::Title] {
            table.set(resource, Read, Public);
            table.set(resource, Create, Admin);
            table.set(resource, Update, Admin);
            table.set(resource, Delete, Admin);
        }
        for resource in [R::Review, R::Comment] {
            table.set(resource, Read, Public);
            table.set(resource, Create, Authenticated);
            table.set(resource, Update, OwnerOrStaff);
            table.set(resource, Delete, OwnerOrStaff);
        }
        table
    }

    /// A table with no rules; everything requires an admin.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Insert or replace one rule.
    pub fn set(&mut self, resource: ResourceKind, action: Action, requirement: Requirement) {
        self.rules.insert((resource, action), requirement);
    }

    /// Requirement for a pair.
    pub fn requirement(&self, resource: ResourceKind, action: Action) -> Requirement {
        self.rules
            .get(&(resource, action))
            .copied()
            .unwrap_or(Requirement::Admin)
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::new()
    }
}
