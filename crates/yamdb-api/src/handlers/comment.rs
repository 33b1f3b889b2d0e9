//! Comment handlers, scoped to a review of a title.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use yamdb_core::error::AppError;
use yamdb_core::types::PageResponse;

use crate::dto::request::{CommentRequest, UpdateCommentRequest};
use crate::dto::response::{ApiResponse, CommentResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, MaybeAuthUser, PaginationParams, ValidatedJson, parse_id};
use crate::state::AppState;

fn review_scope(title_id: &str, review_id: &str) -> Result<(Uuid, Uuid), AppError> {
    Ok((parse_id("Title", title_id)?, parse_id("Review", review_id)?))
}

/// GET /api/v1/titles/{title_id}/reviews/{review_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    ctx: MaybeAuthUser,
    Path((title_id, review_id)): Path<(String, String)>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<CommentResponse>>>> {
    let (title_id, review_id) = review_scope(&title_id, &review_id)?;
    let page = state
        .comment_service
        .list(&ctx, title_id, review_id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.map(CommentResponse::from))))
}

/// POST /api/v1/titles/{title_id}/reviews/{review_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((title_id, review_id)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CommentResponse>>)> {
    let (title_id, review_id) = review_scope(&title_id, &review_id)?;
    let comment = state
        .comment_service
        .create(&auth, title_id, review_id, req.text)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(comment.into()))))
}

/// GET /api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn get_comment(
    State(state): State<AppState>,
    ctx: MaybeAuthUser,
    Path((title_id, review_id, comment_id)): Path<(String, String, String)>,
) -> ApiResult<Json<ApiResponse<CommentResponse>>> {
    let (title_id, review_id) = review_scope(&title_id, &review_id)?;
    let comment_id = parse_id("Comment", &comment_id)?;
    let comment = state
        .comment_service
        .get(&ctx, title_id, review_id, comment_id)
        .await?;
    Ok(Json(ApiResponse::ok(comment.into())))
}

/// PATCH /api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((title_id, review_id, comment_id)): Path<(String, String, String)>,
    ValidatedJson(req): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<ApiResponse<CommentResponse>>> {
    let (title_id, review_id) = review_scope(&title_id, &review_id)?;
    let comment_id = parse_id("Comment", &comment_id)?;
    let comment = state
        .comment_service
        .update(&auth, title_id, review_id, comment_id, req.text)
        .await?;
    Ok(Json(ApiResponse::ok(comment.into())))
}

/// DELETE /api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((title_id, review_id, comment_id)): Path<(String, String, String)>,
) -> ApiResult<StatusCode> {
    let (title_id, review_id) = review_scope(&title_id, &review_id)?;
    let comment_id = parse_id("Comment", &comment_id)?;
    state
        .comment_service
        .delete(&auth, title_id, review_id, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
