//! Category and genre handlers. Both share one implementation keyed by
//! `TaxonomyKind`; the public functions only pin the kind.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use yamdb_core::types::PageResponse;
use yamdb_entity::catalog::TaxonomyKind;

use crate::dto::request::{SearchQuery, TaxonRequest, UpdateTaxonRequest};
use crate::dto::response::{ApiResponse, TaxonResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, MaybeAuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

type TaxonPage = Json<ApiResponse<PageResponse<TaxonResponse>>>;
type TaxonBody = Json<ApiResponse<TaxonResponse>>;

async fn list(
    state: AppState,
    ctx: MaybeAuthUser,
    kind: TaxonomyKind,
    query: SearchQuery,
    params: PaginationParams,
) -> ApiResult<TaxonPage> {
    let search = query.search.as_deref().filter(|s| !s.trim().is_empty());
    let page = state
        .taxonomy_service
        .list(&ctx, kind, search, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.map(TaxonResponse::from))))
}

async fn create(
    state: AppState,
    auth: AuthUser,
    kind: TaxonomyKind,
    req: TaxonRequest,
) -> ApiResult<(StatusCode, TaxonBody)> {
    let taxon = state
        .taxonomy_service
        .create(&auth, kind, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(taxon.into()))))
}

async fn get(
    state: AppState,
    ctx: MaybeAuthUser,
    kind: TaxonomyKind,
    slug: String,
) -> ApiResult<TaxonBody> {
    let taxon = state.taxonomy_service.get(&ctx, kind, &slug).await?;
    Ok(Json(ApiResponse::ok(taxon.into())))
}

async fn update(
    state: AppState,
    auth: AuthUser,
    kind: TaxonomyKind,
    slug: String,
    req: UpdateTaxonRequest,
) -> ApiResult<TaxonBody> {
    let taxon = state
        .taxonomy_service
        .update(&auth, kind, &slug, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(taxon.into())))
}

async fn delete(
    state: AppState,
    auth: AuthUser,
    kind: TaxonomyKind,
    slug: String,
) -> ApiResult<StatusCode> {
    state.taxonomy_service.delete(&auth, kind, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Categories ───────────────────────────────────────────

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    ctx: MaybeAuthUser,
    Query(query): Query<SearchQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<TaxonPage> {
    list(state, ctx, TaxonomyKind::Category, query, params).await
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<TaxonRequest>,
) -> ApiResult<(StatusCode, TaxonBody)> {
    create(state, auth, TaxonomyKind::Category, req).await
}

/// GET /api/v1/categories/{slug}
pub async fn get_category(
    State(state): State<AppState>,
    ctx: MaybeAuthUser,
    Path(slug): Path<String>,
) -> ApiResult<TaxonBody> {
    get(state, ctx, TaxonomyKind::Category, slug).await
}

/// PATCH /api/v1/categories/{slug}
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTaxonRequest>,
) -> ApiResult<TaxonBody> {
    update(state, auth, TaxonomyKind::Category, slug, req).await
}

/// DELETE /api/v1/categories/{slug}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<StatusCode> {
    delete(state, auth, TaxonomyKind::Category, slug).await
}

// ── Genres ───────────────────────────────────────────────

/// GET /api/v1/genres
pub async fn list_genres(
    State(state): State<AppState>,
    ctx: MaybeAuthUser,
    Query(query): Query<SearchQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<TaxonPage> {
    list(state, ctx, TaxonomyKind::Genre, query, params).await
}

/// POST /api/v1/genres
pub async fn create_genre(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<TaxonRequest>,
) -> ApiResult<(StatusCode, TaxonBody)> {
    create(state, auth, TaxonomyKind::Genre, req).await
}

/// GET /api/v1/genres/{slug}
pub async fn get_genre(
    State(state): State<AppState>,
    ctx: MaybeAuthUser,
    Path(slug): Path<String>,
) -> ApiResult<TaxonBody> {
    get(state, ctx, TaxonomyKind::Genre, slug).await
}

/// PATCH /api/v1/genres/{slug}
pub async fn update_genre(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTaxonRequest>,
) -> ApiResult<TaxonBody> {
    update(state, auth, TaxonomyKind::Genre, slug, req).await
}

/// DELETE /api/v1/genres/{slug}
pub async fn delete_genre(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<StatusCode> {
    delete(state, auth, TaxonomyKind::Genre, slug).await
}
