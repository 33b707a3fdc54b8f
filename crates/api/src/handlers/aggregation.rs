//! Handlers for aggregation and timeline read endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use pulseboard_core::audit::action_types;
use pulseboard_core::error::CoreError;
use pulseboard_core::types::{DayDate, DbId};
use pulseboard_db::models::aggregation::{DailyAggregation, DailyAggregationWithUser};
use pulseboard_db::models::segment::ActivitySegment;
use pulseboard_db::repositories::{AggregationRepo, AuditRepo, SegmentRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::segment::today;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Query parameters for date-scoped reads; date defaults to today.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<DayDate>,
}

/// Combined timeline payload: raw segments plus the current rollup.
#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub segments: Vec<ActivitySegment>,
    /// Absent when no segment has ever been ingested for the date.
    pub aggregation: Option<DailyAggregation>,
}

/// GET /api/v1/admin/aggregations?date=YYYY-MM-DD
///
/// All users' rollups for one date, joined with display names.
pub async fn list_aggregations(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<Vec<DailyAggregationWithUser>>> {
    let date = query.date.unwrap_or_else(today);
    let aggregations = AggregationRepo::list_by_date(&state.pool, date).await?;
    Ok(Json(aggregations))
}

/// GET /api/v1/admin/employees/{id}/aggregation?date=YYYY-MM-DD
///
/// One user's current rollup for a date. 404 when no segment has ever
/// been ingested for the (user, date).
pub async fn get_user_aggregation(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(employee_id): Path<DbId>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<DailyAggregation>> {
    let date = query.date.unwrap_or_else(today);

    let aggregation = AggregationRepo::find_by_user_date(&state.pool, employee_id, date)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DailyAggregation",
            id: employee_id,
        }))?;

    Ok(Json(aggregation))
}

/// GET /api/v1/admin/employees/{id}/timeline?date=YYYY-MM-DD
///
/// One user's segments and rollup for a date. The privileged access is
/// audited; an audit-write failure is logged but never fails the read.
pub async fn employee_timeline(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(employee_id): Path<DbId>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<TimelineResponse>> {
    let date = query.date.unwrap_or_else(today);

    if let Err(e) = AuditRepo::record(
        &state.pool,
        admin.user_id,
        action_types::VIEWED_EMPLOYEE_TIMELINE,
        employee_id,
        &format!("date={date}"),
    )
    .await
    {
        tracing::warn!(actor_id = admin.user_id, error = %e, "Failed to record audit entry");
    }

    let segments = SegmentRepo::list_by_user_date(&state.pool, employee_id, date).await?;
    let aggregation = AggregationRepo::find_by_user_date(&state.pool, employee_id, date).await?;

    Ok(Json(TimelineResponse {
        segments,
        aggregation,
    }))
}
