//! Integration tests for categories, genres and titles.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use yamdb_entity::user::UserRole;

use helpers::TestApp;

#[tokio::test]
async fn test_catalog_reads_are_public_writes_admin_only() {
    let app = TestApp::new();
    let user = app.user_token("viewer", UserRole::User).await;
    let body = json!({ "name": "Film", "slug": "film" });

    let anonymous = app
        .request("POST", "/api/v1/categories", Some(body.clone()), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forbidden = app
        .request("POST", "/api/v1/categories", Some(body), Some(&user))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let listing = app.request("GET", "/api/v1/categories", None, None).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_taxon_slug_rules() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;

    let bad_slug = app
        .request(
            "POST",
            "/api/v1/genres",
            Some(json!({ "name": "Sci-Fi", "slug": "sci fi!" })),
            Some(&admin),
        )
        .await;
    assert_eq!(bad_slug.status, StatusCode::BAD_REQUEST);

    let created = app
        .request(
            "POST",
            "/api/v1/genres",
            Some(json!({ "name": "Sci-Fi", "slug": "sci-fi" })),
            Some(&admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let duplicate = app
        .request(
            "POST",
            "/api/v1/genres",
            Some(json!({ "name": "Science fiction", "slug": "sci-fi" })),
            Some(&admin),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["error"], "CONFLICT");

    let fetched = app.request("GET", "/api/v1/genres/sci-fi", None, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["name"], "Sci-Fi");

    let searched = app
        .request("GET", "/api/v1/genres?search=science", None, None)
        .await;
    assert_eq!(searched.body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_title_read_view_nests_taxonomy() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    let title_id = app.seed_catalog(&admin).await;

    let response = app
        .request("GET", &format!("/api/v1/titles/{title_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(data["name"], "X");
    assert_eq!(data["year"], 2020);
    assert_eq!(data["category"], json!({ "name": "Film", "slug": "film" }));
    assert_eq!(data["genre"], json!([{ "name": "Drama", "slug": "drama" }]));
    assert!(data["rating"].is_null());
}

#[tokio::test]
async fn test_title_validation() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    app.seed_catalog(&admin).await;

    let future = app
        .request(
            "POST",
            "/api/v1/titles",
            Some(json!({ "name": "Later", "year": 3000, "category": "film" })),
            Some(&admin),
        )
        .await;
    assert_eq!(future.status, StatusCode::BAD_REQUEST);

    let unknown_genre = app
        .request(
            "POST",
            "/api/v1/titles",
            Some(json!({ "name": "Y", "year": 2001, "category": "film", "genre": ["nope"] })),
            Some(&admin),
        )
        .await;
    assert_eq!(unknown_genre.status, StatusCode::BAD_REQUEST);

    let no_category = app
        .request(
            "POST",
            "/api/v1/titles",
            Some(json!({ "name": "Z", "year": 2001 })),
            Some(&admin),
        )
        .await;
    assert_eq!(no_category.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_title_filters() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    app.seed_catalog(&admin).await;

    app.request(
        "POST",
        "/api/v1/categories",
        Some(json!({ "name": "Book", "slug": "book" })),
        Some(&admin),
    )
    .await;
    app.request(
        "POST",
        "/api/v1/titles",
        Some(json!({ "name": "Dune", "year": 1965, "category": "book" })),
        Some(&admin),
    )
    .await;

    let by_category = app
        .request("GET", "/api/v1/titles?category=book", None, None)
        .await;
    assert_eq!(by_category.body["data"]["total_items"], 1);
    assert_eq!(by_category.body["data"]["items"][0]["name"], "Dune");

    let by_genre = app
        .request("GET", "/api/v1/titles?genre=drama", None, None)
        .await;
    assert_eq!(by_genre.body["data"]["total_items"], 1);
    assert_eq!(by_genre.body["data"]["items"][0]["name"], "X");

    let by_name = app
        .request("GET", "/api/v1/titles?name=dun", None, None)
        .await;
    assert_eq!(by_name.body["data"]["total_items"], 1);

    let by_year = app
        .request("GET", "/api/v1/titles?year=2020", None, None)
        .await;
    assert_eq!(by_year.body["data"]["total_items"], 1);
    assert_eq!(by_year.body["data"]["items"][0]["name"], "X");
}

#[tokio::test]
async fn test_title_patch_and_category_delete() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    let title_id = app.seed_catalog(&admin).await;
    let path = format!("/api/v1/titles/{title_id}");

    let patched = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "description": "A quiet drama", "genre": [] })),
            Some(&admin),
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["data"]["name"], "X");
    assert_eq!(patched.body["data"]["description"], "A quiet drama");
    assert_eq!(patched.body["data"]["genre"], json!([]));

    let renamed = app
        .request("PATCH", &path, Some(json!({ "name": "Y" })), Some(&admin))
        .await;
    assert_eq!(renamed.body["data"]["description"], "A quiet drama");

    let cleared = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "description": null })),
            Some(&admin),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["data"]["description"].is_null());
    assert_eq!(cleared.body["data"]["name"], "Y");

    let removed = app
        .request("DELETE", "/api/v1/categories/film", None, Some(&admin))
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let after = app.request("GET", &path, None, None).await;
    assert_eq!(after.status, StatusCode::OK);
    assert!(after.body["data"]["category"].is_null());

    let deleted = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let gone = app.request("GET", &path, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_page_number_past_the_end_returns_empty_page() {
    let app = TestApp::new();
    let admin = app.user_token("root", UserRole::Admin).await;
    let title_id = app.seed_catalog(&admin).await;

    let titles = app
        .request(
            "GET",
            "/api/v1/titles?page=18446744073709551615&per_page=100",
            None,
            None,
        )
        .await;
    assert_eq!(titles.status, StatusCode::OK);
    assert_eq!(titles.body["data"]["total_items"], 1);
    assert_eq!(titles.body["data"]["items"], json!([]));

    let reviews = app
        .request(
            "GET",
            &format!("/api/v1/titles/{title_id}/reviews?page=18446744073709551615"),
            None,
            None,
        )
        .await;
    assert_eq!(reviews.status, StatusCode::OK);
    assert_eq!(reviews.body["data"]["items"], json!([]));
}
