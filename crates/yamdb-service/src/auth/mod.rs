//! Confirmation-code sign-up and token exchange.

pub mod service;

pub use service::{AuthService, SignupEcho};
