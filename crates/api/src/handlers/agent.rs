//! Handlers for the desktop-agent endpoints.

use axum::extract::State;
use axum::Json;
use pulseboard_core::error::CoreError;
use pulseboard_db::models::segment::SegmentReport;
use pulseboard_db::repositories::UserRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::ingest;
use crate::middleware::{AuthUser, BodyJson};
use crate::state::AppState;

/// Response body for a segment batch submission.
#[derive(Debug, Serialize)]
pub struct ReceiveSegmentsResponse {
    pub status: &'static str,
    /// Number of reports accepted; invalid reports are skipped, so this
    /// may be less than the batch size without the request failing.
    pub received: usize,
}

/// POST /api/v1/agent/segments
///
/// Accepts a batch of raw segment reports from the authenticated user's
/// desktop agent. A structurally malformed body is rejected wholesale by
/// [`BodyJson`] (400 with the standard error body); a partially-invalid
/// batch still succeeds.
pub async fn receive_segments(
    State(state): State<AppState>,
    user: AuthUser,
    BodyJson(reports): BodyJson<Vec<SegmentReport>>,
) -> AppResult<Json<ReceiveSegmentsResponse>> {
    let received = ingest::ingest_batch(&state.pool, &state.event_bus, user.user_id, &reports).await?;
    Ok(Json(ReceiveSegmentsResponse {
        status: "ok",
        received,
    }))
}

/// Response body for agent status queries.
#[derive(Debug, Serialize)]
pub struct AgentStatusResponse {
    pub agent_configured: bool,
}

/// GET /api/v1/agent/status
pub async fn agent_status(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<AgentStatusResponse>> {
    let record = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(AgentStatusResponse {
        agent_configured: record.agent_configured,
    }))
}

/// POST /api/v1/agent/setup-complete
///
/// Idempotently marks the user's agent as configured without waiting for
/// a first segment batch (e.g. the user opted out of installing it).
pub async fn setup_complete(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<AgentStatusResponse>> {
    UserRepo::mark_agent_configured(&state.pool, user.user_id).await?;
    Ok(Json(AgentStatusResponse {
        agent_configured: true,
    }))
}
