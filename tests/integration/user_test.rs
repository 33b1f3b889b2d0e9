//! Integration tests for self-service profiles and admin user management.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use yamdb_entity::user::UserRole;

use helpers::TestApp;

#[tokio::test]
async fn test_user_list_is_admin_only() {
    let app = TestApp::new();
    let user = app.user_token("plain", UserRole::User).await;
    let moderator = app.user_token("mod", UserRole::Moderator).await;

    for token in [&user, &moderator] {
        let response = app.request("GET", "/api/v1/users", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.body["error"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_admin_lists_and_filters_users() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    app.seed_user("zed", UserRole::Moderator).await;
    app.seed_user("amy", UserRole::User).await;

    let all = app
        .request("GET", "/api/v1/users", None, Some(&admin))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"]["total_items"], 3);
    let names: Vec<&str> = all.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["amy", "root", "zed"]);

    let moderators = app
        .request("GET", "/api/v1/users?role=moderator", None, Some(&admin))
        .await;
    assert_eq!(moderators.body["data"]["total_items"], 1);
    assert_eq!(moderators.body["data"]["items"][0]["username"], "zed");

    let searched = app
        .request("GET", "/api/v1/users?search=AMY", None, Some(&admin))
        .await;
    assert_eq!(searched.body["data"]["total_items"], 1);
}

#[tokio::test]
async fn test_admin_creates_and_manages_user() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;

    let created = app
        .request(
            "POST",
            "/api/v1/users",
            Some(json!({
                "username": "critic",
                "email": "critic@example.com",
                "role": "moderator",
                "bio": "Watches everything",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["role"], "moderator");

    let duplicate = app
        .request(
            "POST",
            "/api/v1/users",
            Some(json!({ "username": "critic", "email": "other@example.com" })),
            Some(&admin),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);

    let fetched = app
        .request("GET", "/api/v1/users/critic", None, Some(&admin))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["bio"], "Watches everything");

    let patched = app
        .request(
            "PATCH",
            "/api/v1/users/critic",
            Some(json!({ "role": "admin" })),
            Some(&admin),
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["data"]["role"], "admin");

    let deleted = app
        .request("DELETE", "/api/v1/users/critic", None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let missing = app
        .request("GET", "/api/v1/users/critic", None, Some(&admin))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_promotion_applies_to_existing_token() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    let user = app.user_token("rising", UserRole::User).await;

    let before = app.request("GET", "/api/v1/users", None, Some(&user)).await;
    assert_eq!(before.status, StatusCode::FORBIDDEN);

    app.request(
        "PATCH",
        "/api/v1/users/rising",
        Some(json!({ "role": "admin" })),
        Some(&admin),
    )
    .await;

    let after = app.request("GET", "/api/v1/users", None, Some(&user)).await;
    assert_eq!(after.status, StatusCode::OK);
}

#[tokio::test]
async fn test_self_update_cannot_change_role() {
    let app = TestApp::new();
    let token = app.user_token("sneaky", UserRole::User).await;

    let response = app
        .request(
            "PATCH",
            "/api/v1/users/me",
            Some(json!({ "role": "admin", "bio": "just a fan" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "user");
    assert_eq!(response.body["data"]["bio"], "just a fan");
}

#[tokio::test]
async fn test_self_delete_revokes_access() {
    let app = TestApp::new();
    let token = app.user_token("leaver", UserRole::User).await;

    let deleted = app
        .request("DELETE", "/api/v1/users/me", None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let after = app
        .request("GET", "/api/v1/users/me", None, Some(&token))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/v1/users/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
