//! Daily aggregation entity model.

use pulseboard_core::types::{DayDate, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `daily_aggregations` table.
///
/// Exactly one row exists per (user, date); every recompute replaces all
/// computed columns in place. `top_apps` is a JSONB array of
/// `{app_name, seconds}` objects, at most ten entries, seconds descending.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyAggregation {
    pub id: DbId,
    pub user_id: DbId,
    pub date: DayDate,
    pub total_active_secs: i64,
    pub total_idle_secs: i64,
    pub total_mouse_moves: i64,
    pub total_mouse_clicks: i64,
    pub total_keystrokes: i64,
    pub total_scroll_events: i64,
    pub top_apps: serde_json::Value,
    pub updated_at: Timestamp,
}

/// Aggregation row joined with the user's display name, for the
/// across-all-users daily listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyAggregationWithUser {
    pub id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub date: DayDate,
    pub total_active_secs: i64,
    pub total_idle_secs: i64,
    pub total_mouse_moves: i64,
    pub total_mouse_clicks: i64,
    pub total_keystrokes: i64,
    pub total_scroll_events: i64,
    pub top_apps: serde_json::Value,
    pub updated_at: Timestamp,
}
