//! Repository for the `daily_aggregations` table.

use pulseboard_core::rollup::DailyTotals;
use pulseboard_core::types::{DayDate, DbId};
use sqlx::PgPool;

use crate::models::aggregation::{DailyAggregation, DailyAggregationWithUser};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, date, total_active_secs, total_idle_secs, \
    total_mouse_moves, total_mouse_clicks, total_keystrokes, \
    total_scroll_events, top_apps, updated_at";

/// Provides upsert and query operations for daily aggregations.
pub struct AggregationRepo;

impl AggregationRepo {
    /// Replace the rollup row for one (user, date) with freshly computed
    /// totals, creating it if absent.
    ///
    /// Every computed column is overwritten, so concurrent recomputes for
    /// the same key converge on the last writer's (complete) result rather
    /// than interleaving partial updates.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        date: DayDate,
        totals: &DailyTotals,
    ) -> Result<DailyAggregation, sqlx::Error> {
        let top_apps = serde_json::to_value(&totals.top_apps)
            .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()));

        let query = format!(
            "INSERT INTO daily_aggregations
                (user_id, date, total_active_secs, total_idle_secs,
                 total_mouse_moves, total_mouse_clicks, total_keystrokes,
                 total_scroll_events, top_apps, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
             ON CONFLICT (user_id, date) DO UPDATE SET
                total_active_secs = EXCLUDED.total_active_secs,
                total_idle_secs = EXCLUDED.total_idle_secs,
                total_mouse_moves = EXCLUDED.total_mouse_moves,
                total_mouse_clicks = EXCLUDED.total_mouse_clicks,
                total_keystrokes = EXCLUDED.total_keystrokes,
                total_scroll_events = EXCLUDED.total_scroll_events,
                top_apps = EXCLUDED.top_apps,
                updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyAggregation>(&query)
            .bind(user_id)
            .bind(date)
            .bind(totals.total_active_secs)
            .bind(totals.total_idle_secs)
            .bind(totals.total_mouse_moves)
            .bind(totals.total_mouse_clicks)
            .bind(totals.total_keystrokes)
            .bind(totals.total_scroll_events)
            .bind(top_apps)
            .fetch_one(pool)
            .await
    }

    /// Fetch the current rollup for one (user, date), if any.
    pub async fn find_by_user_date(
        pool: &PgPool,
        user_id: DbId,
        date: DayDate,
    ) -> Result<Option<DailyAggregation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_aggregations
             WHERE user_id = $1 AND date = $2"
        );
        sqlx::query_as::<_, DailyAggregation>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// List all users' rollups for one date, joined with display names.
    pub async fn list_by_date(
        pool: &PgPool,
        date: DayDate,
    ) -> Result<Vec<DailyAggregationWithUser>, sqlx::Error> {
        sqlx::query_as::<_, DailyAggregationWithUser>(
            "SELECT a.id, a.user_id, u.name AS user_name, a.date,
                    a.total_active_secs, a.total_idle_secs,
                    a.total_mouse_moves, a.total_mouse_clicks,
                    a.total_keystrokes, a.total_scroll_events,
                    a.top_apps, a.updated_at
             FROM daily_aggregations a
             JOIN users u ON u.id = a.user_id
             WHERE a.date = $1
             ORDER BY u.name ASC",
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }
}
