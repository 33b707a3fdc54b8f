//! JSON body extractor with domain error responses.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::error::AppError;

/// Drop-in replacement for `axum::Json` on the extractor side.
///
/// Axum's own extractor splits failures into a plain-text 400 (syntax)
/// or 422 (shape mismatch). Both are equally "structurally malformed
/// request body" to this API, so both map to 400 with the standard
/// `{error, code}` body.
pub struct BodyJson<T>(pub T);

impl<S, T> FromRequest<S> for BodyJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(BodyJson(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
