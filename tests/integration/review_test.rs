//! Integration tests for reviews, ratings and comments.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tokio::task::JoinSet;
use tower::ServiceExt;

use yamdb_entity::user::UserRole;

use helpers::TestApp;

#[tokio::test]
async fn test_rating_follows_reviews() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    let alice = app.user_token("alice", UserRole::User).await;
    let bob = app.user_token("bob", UserRole::User).await;
    let title_id = app.seed_catalog(&admin).await;
    let reviews = format!("/api/v1/titles/{title_id}/reviews");

    let first = app
        .request(
            "POST",
            &reviews,
            Some(json!({ "text": "Great", "score": 8 })),
            Some(&alice),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["data"]["author"], "alice");

    let second = app
        .request(
            "POST",
            &reviews,
            Some(json!({ "text": "Meh", "score": 4 })),
            Some(&bob),
        )
        .await;
    assert_eq!(second.status, StatusCode::CREATED);

    let title = app
        .request("GET", &format!("/api/v1/titles/{title_id}"), None, None)
        .await;
    assert_eq!(title.body["data"]["rating"], 6.0);

    let again = app
        .request(
            "POST",
            &reviews,
            Some(json!({ "text": "Still great", "score": 9 })),
            Some(&alice),
        )
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.body["error"], "CONFLICT");

    let listing = app.request("GET", &reviews, None, None).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["data"]["total_items"], 2);
}

#[tokio::test]
async fn test_concurrent_duplicate_reviews_yield_one_success() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    let alice = app.user_token("alice", UserRole::User).await;
    let title_id = app.seed_catalog(&admin).await;
    let uri = format!("/api/v1/titles/{title_id}/reviews");

    let mut tasks = JoinSet::new();
    for score in 1..=6 {
        let router = app.router.clone();
        let request = Request::builder()
            .method("POST")
            .uri(&uri)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {alice}"))
            .body(Body::from(
                json!({ "text": "race", "score": score }).to_string(),
            ))
            .unwrap();
        tasks.spawn(async move { router.oneshot(request).await.unwrap().status() });
    }

    let mut created = 0;
    let mut rejected = 0;
    while let Some(status) = tasks.join_next().await {
        match status.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => rejected += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(rejected, 5);
}

#[tokio::test]
async fn test_score_out_of_range() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    let alice = app.user_token("alice", UserRole::User).await;
    let title_id = app.seed_catalog(&admin).await;

    let response = app
        .request(
            "POST",
            &format!("/api/v1/titles/{title_id}/reviews"),
            Some(json!({ "text": "Too much", "score": 11 })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_write_policy() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    let alice = app.user_token("alice", UserRole::User).await;
    let bob = app.user_token("bob", UserRole::User).await;
    let moderator = app.user_token("mod", UserRole::Moderator).await;
    let title_id = app.seed_catalog(&admin).await;
    let reviews = format!("/api/v1/titles/{title_id}/reviews");

    let anonymous = app
        .request("POST", &reviews, Some(json!({ "text": "hi", "score": 5 })), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let created = app
        .request(
            "POST",
            &reviews,
            Some(json!({ "text": "Mine", "score": 7 })),
            Some(&alice),
        )
        .await;
    let review_id = created.body["data"]["id"].as_str().unwrap().to_string();
    let review = format!("{reviews}/{review_id}");

    let stranger = app.request("DELETE", &review, None, Some(&bob)).await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);

    let anonymous_patch = app
        .request("PATCH", &review, Some(json!({ "score": 1 })), None)
        .await;
    assert_eq!(anonymous_patch.status, StatusCode::UNAUTHORIZED);

    let moderated = app
        .request(
            "PATCH",
            &review,
            Some(json!({ "text": "Edited by staff" })),
            Some(&moderator),
        )
        .await;
    assert_eq!(moderated.status, StatusCode::OK);
    assert_eq!(moderated.body["data"]["text"], "Edited by staff");
    assert_eq!(moderated.body["data"]["score"], 7);

    let own = app.request("DELETE", &review, None, Some(&alice)).await;
    assert_eq!(own.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &review, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments_are_scoped_to_title() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    let alice = app.user_token("alice", UserRole::User).await;
    let bob = app.user_token("bob", UserRole::User).await;
    let title_id = app.seed_catalog(&admin).await;

    let other = app
        .request(
            "POST",
            "/api/v1/titles",
            Some(json!({ "name": "Other", "year": 1999, "category": "film" })),
            Some(&admin),
        )
        .await;
    let other_id = other.body["data"]["id"].as_str().unwrap().to_string();

    let review = app
        .request(
            "POST",
            &format!("/api/v1/titles/{title_id}/reviews"),
            Some(json!({ "text": "Solid", "score": 6 })),
            Some(&alice),
        )
        .await;
    let review_id = review.body["data"]["id"].as_str().unwrap().to_string();
    let comments = format!("/api/v1/titles/{title_id}/reviews/{review_id}/comments");

    let created = app
        .request("POST", &comments, Some(json!({ "text": "Agreed" })), Some(&bob))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["author"], "bob");
    let comment_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let listing = app.request("GET", &comments, None, None).await;
    assert_eq!(listing.body["data"]["total_items"], 1);

    let misplaced = app
        .request(
            "GET",
            &format!("/api/v1/titles/{other_id}/reviews/{review_id}/comments"),
            None,
            None,
        )
        .await;
    assert_eq!(misplaced.status, StatusCode::NOT_FOUND);

    let by_review_author = app
        .request(
            "PATCH",
            &format!("{comments}/{comment_id}"),
            Some(json!({ "text": "Hijacked" })),
            Some(&alice),
        )
        .await;
    assert_eq!(by_review_author.status, StatusCode::FORBIDDEN);

    let by_author = app
        .request(
            "PATCH",
            &format!("{comments}/{comment_id}"),
            Some(json!({ "text": "Agreed, mostly" })),
            Some(&bob),
        )
        .await;
    assert_eq!(by_author.status, StatusCode::OK);
    assert_eq!(by_author.body["data"]["text"], "Agreed, mostly");
}

#[tokio::test]
async fn test_title_delete_cascades_to_reviews() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    let alice = app.user_token("alice", UserRole::User).await;
    let title_id = app.seed_catalog(&admin).await;
    let reviews = format!("/api/v1/titles/{title_id}/reviews");

    app.request(
        "POST",
        &reviews,
        Some(json!({ "text": "Soon gone", "score": 3 })),
        Some(&alice),
    )
    .await;

    let deleted = app
        .request("DELETE", &format!("/api/v1/titles/{title_id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let listing = app.request("GET", &reviews, None, None).await;
    assert_eq!(listing.status, StatusCode::NOT_FOUND);
}
