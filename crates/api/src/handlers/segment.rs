//! Handlers for segment read endpoints.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Local;
use pulseboard_core::audit::action_types;
use pulseboard_core::types::{DayDate, DbId};
use pulseboard_db::models::segment::ActivitySegment;
use pulseboard_db::repositories::{AuditRepo, SegmentRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::{AuthUser, RequireAdmin};
use crate::state::AppState;

/// Query parameters for own-segment reads; date defaults to today.
#[derive(Debug, Deserialize)]
pub struct MySegmentsQuery {
    pub date: Option<DayDate>,
}

/// Query parameters for privileged segment reads.
#[derive(Debug, Deserialize)]
pub struct SegmentsQuery {
    pub user_id: DbId,
    pub date: DayDate,
}

/// Today's date in the server's local time zone, matching how segment
/// dates are derived at ingestion.
pub(crate) fn today() -> DayDate {
    Local::now().date_naive()
}

/// GET /api/v1/segments/me?date=YYYY-MM-DD
///
/// The authenticated user's own segments for a date, start time ascending.
pub async fn get_my_segments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MySegmentsQuery>,
) -> AppResult<Json<Vec<ActivitySegment>>> {
    let date = query.date.unwrap_or_else(today);
    let segments = SegmentRepo::list_by_user_date(&state.pool, user.user_id, date).await?;
    Ok(Json(segments))
}

/// GET /api/v1/segments?user_id=X&date=YYYY-MM-DD
///
/// Admin-only read of another user's segments. The privileged access is
/// audited; an audit-write failure is logged but never fails the read.
pub async fn get_segments(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<SegmentsQuery>,
) -> AppResult<Json<Vec<ActivitySegment>>> {
    if let Err(e) = AuditRepo::record(
        &state.pool,
        admin.user_id,
        action_types::VIEWED_TIMELINE,
        query.user_id,
        &format!("date={}", query.date),
    )
    .await
    {
        tracing::warn!(actor_id = admin.user_id, error = %e, "Failed to record audit entry");
    }

    let segments = SegmentRepo::list_by_user_date(&state.pool, query.user_id, query.date).await?;
    Ok(Json(segments))
}
