//! Route definitions for the YaMDb HTTP API.
//!
//! Versioned resources are mounted under `/api/v1`; the health probe lives
//! at `/api/health`. The router receives `AppState` and passes it to all
//! handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes. Middleware is added by
/// [`crate::app::build_app`].
pub fn build_router(state: AppState) -> Router {
    let v1 = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(taxonomy_routes())
        .merge(title_routes())
        .merge(review_routes());

    Router::new()
        .nest("/api/v1", v1)
        .route("/api/health", get(handlers::health::health))
        .with_state(state)
}

/// Confirmation-code signup and token exchange.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/token", post(handlers::auth::token))
}

/// Self profile and admin user management.
fn user_routes() -> Router<AppState> {
    use handlers::user;

    Router::new()
        .route("/users", get(user::list_users).post(user::create_user))
        .route(
            "/users/me",
            get(user::get_me)
                .patch(user::update_me)
                .delete(user::delete_me),
        )
        .route(
            "/users/{username}",
            get(user::get_user)
                .patch(user::update_user)
                .delete(user::delete_user),
        )
}

fn taxonomy_routes() -> Router<AppState> {
    use handlers::taxonomy as t;

    Router::new()
        .route(
            "/categories",
            get(t::list_categories).post(t::create_category),
        )
        .route(
            "/categories/{slug}",
            get(t::get_category)
                .patch(t::update_category)
                .delete(t::delete_category),
        )
        .route("/genres", get(t::list_genres).post(t::create_genre))
        .route(
            "/genres/{slug}",
            get(t::get_genre)
                .patch(t::update_genre)
                .delete(t::delete_genre),
        )
}

fn title_routes() -> Router<AppState> {
    use handlers::title;

    Router::new()
        .route("/titles", get(title::list_titles).post(title::create_title))
        .route(
            "/titles/{title_id}",
            get(title::get_title)
                .patch(title::update_title)
                .delete(title::delete_title),
        )
}

/// Reviews and their comments, nested under a title.
fn review_routes() -> Router<AppState> {
    use handlers::{comment, review};

    Router::new()
        .route(
            "/titles/{title_id}/reviews",
            get(review::list_reviews).post(review::create_review),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}",
            get(review::get_review)
                .patch(review::update_review)
                .delete(review::delete_review),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments",
            get(comment::list_comments).post(comment::create_comment),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
            get(comment::get_comment)
                .patch(comment::update_comment)
                .delete(comment::delete_comment),
        )
}
