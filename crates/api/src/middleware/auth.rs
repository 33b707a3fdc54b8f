//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pulseboard_core::error::CoreError;
use pulseboard_core::types::roles::ROLE_ADMIN;
use pulseboard_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, extracted from a Bearer token in the
/// `Authorization` header.
///
/// Any handler that takes this as a parameter rejects unauthenticated
/// requests with 401 before its body runs:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (e.g. `"admin"`, `"employee"`).
    pub role: String,
}

impl AuthUser {
    /// Whether this caller holds the monitoring/reporting role.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Pull the Bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, CoreError> {
    let header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        CoreError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
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
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
