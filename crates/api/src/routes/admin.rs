//! Route definitions for admin reporting reads.

use axum::routing::get;
use axum::Router;

use crate::handlers::aggregation;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET /aggregations                   list_aggregations (?date=)
/// GET /employees/{id}/aggregation     get_user_aggregation (?date=)
/// GET /employees/{id}/timeline        employee_timeline (?date=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/aggregations", get(aggregation::list_aggregations))
        .route(
            "/employees/{id}/aggregation",
            get(aggregation::get_user_aggregation),
        )
        .route(
            "/employees/{id}/timeline",
            get(aggregation::employee_timeline),
        )
}
