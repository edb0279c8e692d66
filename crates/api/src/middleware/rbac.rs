//! Role checks as extractors.
//!
//! Putting the role requirement in the handler signature keeps the
//! authorization decision in one place per operation instead of scattering
//! role comparisons through handler bodies.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use barkpark_core::error::CoreError;
use barkpark_core::roles::is_admin;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] whose role carries administrator privileges.
///
/// Extraction runs authentication first, then rejects non-admin callers
/// with 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_admin(&user.role) {
            return Err(CoreError::Forbidden("Administrator role required".into()).into());
        }
        Ok(RequireAdmin(user))
    }
}
