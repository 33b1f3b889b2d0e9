//! Collaborator traits defined in `yamdb-core` and implemented by other crates.

pub mod notifier;

pub use notifier::{Notifier, OutgoingMail};
