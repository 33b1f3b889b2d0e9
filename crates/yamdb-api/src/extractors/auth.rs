//! Bearer-token extractors: pull the JWT from the Authorization header,
//! reload the user it names and inject a `RequestContext`.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use yamdb_auth::policy::Principal;
use yamdb_core::error::AppError;
use yamdb_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller. Rejects with 401 when no valid token is present.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve(parts, state).await? {
            Some(ctx) => Ok(AuthUser(ctx)),
            None => Err(AppError::authentication(
                "Authentication credentials were not provided",
            )
            .into()),
        }
    }
}

/// Caller on a public endpoint. Anonymous when the header is absent; a
/// malformed or expired token is still rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub RequestContext);

impl std::ops::Deref for MaybeAuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = resolve(parts, state)
            .await?
            .unwrap_or_else(RequestContext::anonymous);
        Ok(MaybeAuthUser(ctx))
    }
}

/// `Ok(None)` when no Authorization header was sent.
async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<RequestContext>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    let claims = state.jwt_decoder.decode_access_token(token.trim())?;

    // Role is taken from the stored user, not from the token.
    let user = state
        .repos
        .users
        .find_by_id(claims.user_id())
        .await?
        .ok_or_else(|| AppError::authentication("User not found"))?;

    let ctx = RequestContext::authenticated(Principal::from(&user));
    debug!(
        request_id = %ctx.request_id,
        user_id = %user.id,
        role = %user.role,
        "Bearer token accepted"
    );
    Ok(Some(ctx))
}
