//! Route definitions for segment reads.

use axum::routing::get;
use axum::Router;

use crate::handlers::segment;
use crate::state::AppState;

/// Routes mounted at `/segments`.
///
/// ```text
/// GET /       get_segments (admin; ?user_id= &date=)
/// GET /me     get_my_segments (?date=, defaults to today)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(segment::get_segments))
        .route("/me", get(segment::get_my_segments))
}
