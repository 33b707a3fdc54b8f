//! Route definitions for the desktop-agent surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::agent;
use crate::state::AppState;

/// Routes mounted at `/agent`.
///
/// ```text
/// POST /segments          receive_segments
/// GET  /status            agent_status
/// POST /setup-complete    setup_complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/segments", post(agent::receive_segments))
        .route("/status", get(agent::agent_status))
        .route("/setup-complete", post(agent::setup_complete))
}
