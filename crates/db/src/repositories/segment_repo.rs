//! Repository for the `activity_segments` table.

use pulseboard_core::types::{DayDate, DbId};
use sqlx::PgPool;

use crate::models::segment::{ActivitySegment, NewActivitySegment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, start_time, end_time, duration_secs, \
    segment_kind, app_name, window_title, \
    mouse_moves, mouse_clicks, keystrokes, scroll_events, \
    date, created_at";

/// Provides insert and query operations for activity segments.
///
/// Segments are append-only; there are no update or delete methods.
pub struct SegmentRepo;

impl SegmentRepo {
    /// Insert one accepted segment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &NewActivitySegment,
    ) -> Result<ActivitySegment, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_segments
                (user_id, start_time, end_time, duration_secs, segment_kind,
                 app_name, window_title, mouse_moves, mouse_clicks,
                 keystrokes, scroll_events, date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivitySegment>(&query)
            .bind(input.user_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.duration_secs)
            .bind(input.segment_kind.as_str())
            .bind(&input.app_name)
            .bind(&input.window_title)
            .bind(input.mouse_moves)
            .bind(input.mouse_clicks)
            .bind(input.keystrokes)
            .bind(input.scroll_events)
            .bind(input.date)
            .fetch_one(pool)
            .await
    }

    /// List all segments for one (user, date), ordered by start time ascending.
    pub async fn list_by_user_date(
        pool: &PgPool,
        user_id: DbId,
        date: DayDate,
    ) -> Result<Vec<ActivitySegment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_segments
             WHERE user_id = $1 AND date = $2
             ORDER BY start_time ASC"
        );
        sqlx::query_as::<_, ActivitySegment>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }
}
