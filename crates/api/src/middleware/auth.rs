//! Authentication extractor.
//!
//! Handlers that need a caller identity take [`AuthUser`] as a parameter;
//! extraction fails with 401 before the handler body runs when the Bearer
//! token is missing, malformed, expired, or signed under the wrong secret.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use barkpark_core::error::CoreError;
use barkpark_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The verified caller, taken from the access token's claims.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// Role as issued; `user`, `admin`, or `super_admin`.
    pub role: String,
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(parts: &Parts) -> Result<&str, CoreError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| CoreError::Unauthorized("Authorization header is missing".into()))?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        CoreError::Unauthorized("Authorization header must be 'Bearer <token>'".into())
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = state.config.jwt.verify(token).map_err(|_| {
            CoreError::Unauthorized("Access token is invalid or expired".into())
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
