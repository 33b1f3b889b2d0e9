//! User handlers: `/users/me` self-service and admin management by username.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use yamdb_core::types::PageResponse;

use crate::dto::request::{CreateUserRequest, UpdateUserRequest, UserListQuery};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PATCH /api/v1/users/me
///
/// A `role` in the body is ignored.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.update_profile(&auth, req.into()).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/v1/users/me
pub async fn delete_me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<StatusCode> {
    state.user_service.delete_profile(&auth).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserListQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<UserResponse>>>> {
    let page = state
        .admin_user_service
        .list_users(&auth, &query.into(), &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.map(UserResponse::from))))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state
        .admin_user_service
        .create_user(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// GET /api/v1/users/{username}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.admin_user_service.get_user(&auth, &username).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PATCH /api/v1/users/{username}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .admin_user_service
        .update_user(&auth, &username, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/v1/users/{username}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .admin_user_service
        .delete_user(&auth, &username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
