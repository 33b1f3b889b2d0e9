//! Review handlers, scoped to a title.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use yamdb_core::types::PageResponse;

use crate::dto::request::{CreateReviewRequest, UpdateReviewRequest};
use crate::dto::response::{ApiResponse, ReviewResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, MaybeAuthUser, PaginationParams, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/v1/titles/{title_id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    ctx: MaybeAuthUser,
    Path(title_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<ReviewResponse>>>> {
    let title_id = parse_id("Title", &title_id)?;
    let page = state
        .review_service
        .list(&ctx, title_id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.map(ReviewResponse::from))))
}

/// POST /api/v1/titles/{title_id}/reviews
///
/// A second review of the same title by the same author is rejected.
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(title_id): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateReviewRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ReviewResponse>>)> {
    let title_id = parse_id("Title", &title_id)?;
    let review = state
        .review_service
        .create(&auth, title_id, req.text, req.score)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(review.into()))))
}

/// GET /api/v1/titles/{title_id}/reviews/{review_id}
pub async fn get_review(
    State(state): State<AppState>,
    ctx: MaybeAuthUser,
    Path((title_id, review_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<ReviewResponse>>> {
    let title_id = parse_id("Title", &title_id)?;
    let review_id = parse_id("Review", &review_id)?;
    let review = state.review_service.get(&ctx, title_id, review_id).await?;
    Ok(Json(ApiResponse::ok(review.into())))
}

/// PATCH /api/v1/titles/{title_id}/reviews/{review_id}
pub async fn update_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((title_id, review_id)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<UpdateReviewRequest>,
) -> ApiResult<Json<ApiResponse<ReviewResponse>>> {
    let title_id = parse_id("Title", &title_id)?;
    let review_id = parse_id("Review", &review_id)?;
    let review = state
        .review_service
        .update(&auth, title_id, review_id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(review.into())))
}

/// DELETE /api/v1/titles/{title_id}/reviews/{review_id}
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((title_id, review_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let title_id = parse_id("Title", &title_id)?;
    let review_id = parse_id("Review", &review_id)?;
    state
        .review_service
        .delete(&auth, title_id, review_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
