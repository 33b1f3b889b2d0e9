//! Integration tests for the confirmation-code flow.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;

use yamdb_core::AppResult;
use yamdb_core::error::AppError;
use yamdb_core::traits::{Notifier, OutgoingMail};

use helpers::{Mailbox, TestApp};

#[tokio::test]
async fn test_signup_is_idempotent_for_same_pair() {
    let app = TestApp::new();
    let body = json!({ "username": "alice", "email": "alice@example.com" });

    let first = app
        .request("POST", "/api/v1/auth/signup", Some(body.clone()), None)
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["username"], "alice");
    assert_eq!(first.body["data"]["email"], "alice@example.com");

    let second = app
        .request("POST", "/api/v1/auth/signup", Some(body), None)
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(app.mailbox.count(), 2);
}

#[tokio::test]
async fn test_signup_rejects_mismatched_identity() {
    let app = TestApp::new();
    app.request(
        "POST",
        "/api/v1/auth/signup",
        Some(json!({ "username": "alice", "email": "alice@example.com" })),
        None,
    )
    .await;

    let other_email = app
        .request(
            "POST",
            "/api/v1/auth/signup",
            Some(json!({ "username": "alice", "email": "other@example.com" })),
            None,
        )
        .await;
    assert_eq!(other_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(other_email.body["error"], "CONFLICT");

    let other_name = app
        .request(
            "POST",
            "/api/v1/auth/signup",
            Some(json!({ "username": "alice2", "email": "alice@example.com" })),
            None,
        )
        .await;
    assert_eq!(other_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(other_name.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_signup_rejects_bad_usernames() {
    let app = TestApp::new();

    for username in ["me", "bad name", "semi;colon"] {
        let response = app
            .request(
                "POST",
                "/api/v1/auth/signup",
                Some(json!({ "username": username, "email": "x@example.com" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{username}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }
    assert_eq!(app.mailbox.count(), 0);
}

#[tokio::test]
async fn test_token_without_signup_is_generic_error() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/v1/auth/token",
            Some(json!({ "username": "ghost", "confirmation_code": "123-abc" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "invalid code");
}

#[tokio::test]
async fn test_wrong_code_looks_like_unknown_user() {
    let app = TestApp::new();
    app.request(
        "POST",
        "/api/v1/auth/signup",
        Some(json!({ "username": "bob", "email": "bob@example.com" })),
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/token",
            Some(json!({ "username": "bob", "confirmation_code": "1-deadbeef" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "invalid code");
}

#[tokio::test]
async fn test_code_is_single_use() {
    let app = TestApp::new();
    app.request(
        "POST",
        "/api/v1/auth/signup",
        Some(json!({ "username": "carol", "email": "carol@example.com" })),
        None,
    )
    .await;
    let code = app.mailbox.last_code_for("carol@example.com").unwrap();
    let body = json!({ "username": "carol", "confirmation_code": code });

    let first = app
        .request("POST", "/api/v1/auth/token", Some(body.clone()), None)
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert!(first.body["data"]["token"].is_string());

    let second = app
        .request("POST", "/api/v1/auth/token", Some(body), None)
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_issued_token_authenticates() {
    let app = TestApp::new();
    let token = app.sign_in("dave").await;

    let response = app
        .request("GET", "/api/v1/users/me", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "dave");
    assert_eq!(response.body["data"]["role"], "user");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/api/v1/titles", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[derive(Debug)]
struct DownMailer;

#[async_trait]
impl Notifier for DownMailer {
    async fn send(&self, _mail: &OutgoingMail) -> AppResult<()> {
        Err(AppError::external_service("mail relay unreachable"))
    }
}

#[tokio::test]
async fn test_mail_failure_fails_signup() {
    let app = TestApp::with_notifier(Arc::new(DownMailer), Arc::new(Mailbox::default()));
    let response = app
        .request(
            "POST",
            "/api/v1/auth/signup",
            Some(json!({ "username": "erin", "email": "erin@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}
