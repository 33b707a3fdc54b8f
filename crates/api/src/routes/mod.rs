pub mod admin;
pub mod agent;
pub mod health;
pub mod segments;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws/monitor                         WebSocket (token query param, admin)
///
/// /agent/segments                     batch ingestion (POST)
/// /agent/status                       agent-configured flag (GET)
/// /agent/setup-complete               mark configured (POST)
///
/// /segments                           admin read of any user's day (GET)
/// /segments/me                        own segments for a day (GET)
///
/// /admin/aggregations                 all users' rollups for a day (GET)
/// /admin/employees/{id}/aggregation   one user's rollup for a day (GET)
/// /admin/employees/{id}/timeline      segments + rollup for a day (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws/monitor", get(ws::monitor_ws_handler))
        .nest("/agent", agent::router())
        .nest("/segments", segments::router())
        .nest("/admin", admin::router())
}
