//! Daily aggregation engine.
//!
//! Recomputes one (user, date) rollup from scratch: load every segment
//! for the key, run the pure rollup computation, and replace the stored
//! row wholesale. No incremental deltas — a full recompute is idempotent
//! and commutative under concurrent triggers, so duplicate or interleaved
//! invocations for the same key always converge on the correct result
//! for the segments persisted so far.

use pulseboard_core::rollup;
use pulseboard_core::types::{DayDate, DbId};
use pulseboard_db::models::aggregation::DailyAggregation;
use pulseboard_db::repositories::{AggregationRepo, SegmentRepo};
use pulseboard_db::DbPool;

/// Recompute and persist the daily rollup for one (user, date).
///
/// A failure here is reported to the caller but must never roll back
/// already-persisted segments: segments are the source of truth, and
/// re-invoking with the same key later (e.g. on the next batch for this
/// date) repairs the rollup.
pub async fn recompute_daily(
    pool: &DbPool,
    user_id: DbId,
    date: DayDate,
) -> Result<DailyAggregation, sqlx::Error> {
    let segments = SegmentRepo::list_by_user_date(pool, user_id, date).await?;

    let totals = rollup::compute_daily_totals(segments.iter().filter_map(|s| s.view()));

    let aggregation = AggregationRepo::upsert(pool, user_id, date, &totals).await?;

    tracing::debug!(
        user_id,
        %date,
        segments = segments.len(),
        active_secs = totals.total_active_secs,
        idle_secs = totals.total_idle_secs,
        "Recomputed daily aggregation"
    );

    Ok(aggregation)
}
