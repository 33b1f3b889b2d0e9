//! Title handlers. Reads embed nested taxonomy and the computed rating.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use yamdb_core::types::PageResponse;
use yamdb_entity::catalog::TitleView;

use crate::dto::request::{CreateTitleRequest, TitleListQuery, UpdateTitleRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, MaybeAuthUser, PaginationParams, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/v1/titles
pub async fn list_titles(
    State(state): State<AppState>,
    ctx: MaybeAuthUser,
    Query(query): Query<TitleListQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<TitleView>>>> {
    let page = state
        .title_service
        .list(&ctx, &query.into(), &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/v1/titles
pub async fn create_title(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateTitleRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TitleView>>)> {
    let view = state.title_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(view))))
}

/// GET /api/v1/titles/{title_id}
pub async fn get_title(
    State(state): State<AppState>,
    ctx: MaybeAuthUser,
    Path(title_id): Path<String>,
) -> ApiResult<Json<ApiResponse<TitleView>>> {
    let id = parse_id("Title", &title_id)?;
    let view = state.title_service.get(&ctx, id).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PATCH /api/v1/titles/{title_id}
pub async fn update_title(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(title_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTitleRequest>,
) -> ApiResult<Json<ApiResponse<TitleView>>> {
    let id = parse_id("Title", &title_id)?;
    let view = state.title_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// DELETE /api/v1/titles/{title_id}
pub async fn delete_title(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(title_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id("Title", &title_id)?;
    state.title_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
