//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the full router over a fresh in-memory store and
//! captures outgoing mail so tests can read confirmation codes.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use yamdb_api::AppState;
use yamdb_core::AppResult;
use yamdb_core::config::AppConfig;
use yamdb_core::traits::{Notifier, OutgoingMail};
use yamdb_database::{MemoryStore, Repositories};
use yamdb_entity::user::{CreateUser, UserRole};

/// Notifier that keeps every message in memory.
#[derive(Debug, Default)]
pub struct Mailbox {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl Mailbox {
    /// Code from the most recent message sent to `email`.
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        sent.iter()
            .rev()
            .find(|m| m.recipient == email)
            .and_then(|m| m.body.rsplit(' ').next())
            .map(str::to_string)
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for Mailbox {
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum app, middleware included
    pub router: Router,
    /// Direct store access for seeding
    pub repos: Repositories,
    /// Captured confirmation mails
    pub mailbox: Arc<Mailbox>,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mailbox = Arc::new(Mailbox::default());
        Self::with_notifier(mailbox.clone(), mailbox)
    }

    /// Test application whose mail goes to `notifier`.
    pub fn with_notifier(notifier: Arc<dyn Notifier>, mailbox: Arc<Mailbox>) -> Self {
        let mut config = AppConfig::in_memory();
        config.auth.jwt_secret = "integration-jwt-secret".to_string();
        config.auth.confirmation_secret = "integration-code-secret".to_string();

        let repos = Repositories::memory(MemoryStore::new());
        let state = AppState::build(config, repos.clone(), notifier).unwrap();

        Self {
            router: yamdb_api::build_app(state),
            repos,
            mailbox,
        }
    }

    /// Insert a user with the given role directly into the store.
    pub async fn seed_user(&self, username: &str, role: UserRole) {
        self.repos
            .users
            .create(&CreateUser {
                role,
                ..CreateUser::basic(username, email_of(username))
            })
            .await
            .expect("Failed to seed user");
    }

    /// Seed a user and sign them in through the HTTP flow.
    pub async fn user_token(&self, username: &str, role: UserRole) -> String {
        self.seed_user(username, role).await;
        self.sign_in(username).await
    }

    /// Signup + code exchange for `{username}@example.com`.
    pub async fn sign_in(&self, username: &str) -> String {
        let email = email_of(username);
        let response = self
            .request(
                "POST",
                "/api/v1/auth/signup",
                Some(json!({ "username": username, "email": email })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Signup failed: {:?}", response.body);

        let code = self
            .mailbox
            .last_code_for(&email)
            .expect("No confirmation mail sent");

        let response = self
            .request(
                "POST",
                "/api/v1/auth/token",
                Some(json!({ "username": username, "confirmation_code": code })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Token exchange failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create category `film`, genre `drama` and one title; returns its id.
    pub async fn seed_catalog(&self, admin: &str) -> String {
        let category = self
            .request(
                "POST",
                "/api/v1/categories",
                Some(json!({ "name": "Film", "slug": "film" })),
                Some(admin),
            )
            .await;
        assert_eq!(category.status, StatusCode::CREATED, "{:?}", category.body);

        let genre = self
            .request(
                "POST",
                "/api/v1/genres",
                Some(json!({ "name": "Drama", "slug": "drama" })),
                Some(admin),
            )
            .await;
        assert_eq!(genre.status, StatusCode::CREATED, "{:?}", genre.body);

        let title = self
            .request(
                "POST",
                "/api/v1/titles",
                Some(json!({
                    "name": "X",
                    "year": 2020,
                    "category": "film",
                    "genre": ["drama"],
                })),
                Some(admin),
            )
            .await;
        assert_eq!(title.status, StatusCode::CREATED, "{:?}", title.body);

        title.body["data"]["id"]
            .as_str()
            .expect("No title id")
            .to_string()
    }
}

pub fn email_of(username: &str) -> String {
    format!("{username}@example.com")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
