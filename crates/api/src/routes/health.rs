use std::time::Duration;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Upper bound on the database round-trip probe. Pool acquisition
/// retries for its own (much longer) acquire timeout when the database
/// is down; the health check must answer fast instead of hanging.
const DB_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the database is reachable, `"degraded"` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database answered a round-trip query.
    pub db_healthy: bool,
    /// Number of currently connected monitoring observers.
    pub observers: usize,
}

/// GET /health
///
/// Liveness plus a coarse readiness signal. The observer count is
/// informational; zero observers is a normal state, not a defect.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = matches!(
        tokio::time::timeout(DB_PROBE_TIMEOUT, pulseboard_db::health_check(&state.pool)).await,
        Ok(Ok(()))
    );
    let observers = state.ws_manager.connection_count().await;

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        observers,
    })
}

/// Mount health check routes (root-level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
