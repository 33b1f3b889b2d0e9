//! Auth handlers: confirmation-code signup and token exchange.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use yamdb_service::SignupEcho;

use crate::dto::request::{SignupRequest, TokenRequest};
use crate::dto::response::{ApiResponse, TokenResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/v1/auth/signup
///
/// Safe to repeat: an identical pair gets a fresh code mailed.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<Json<ApiResponse<SignupEcho>>> {
    let echo = state
        .auth_service
        .request_code(&req.username, &req.email)
        .await?;
    Ok(Json(ApiResponse::ok(echo)))
}

/// POST /api/v1/auth/token
pub async fn token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TokenRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TokenResponse>>)> {
    let issued = state
        .auth_service
        .exchange_code(&req.username, &req.confirmation_code)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(TokenResponse::from(issued))),
    ))
}
