//! Segment batch ingestion pipeline.
//!
//! One inbound batch flows through here: per-report validation and
//! normalization (including the privacy filter), persistence, synchronous
//! rollup recompute for each touched date, and a single monitor event for
//! the batch. Individual invalid reports are skipped; they never abort
//! the batch.

use std::collections::BTreeSet;

use pulseboard_core::types::{DayDate, DbId};
use pulseboard_db::models::segment::SegmentReport;
use pulseboard_db::repositories::{SegmentRepo, UserRepo};
use pulseboard_db::DbPool;
use pulseboard_events::{EventBus, MonitorEvent};

use crate::aggregation;
use crate::error::AppResult;

/// Ingest one batch of raw segment reports for an authenticated user.
///
/// Returns the number of accepted segments. An empty batch is a no-op
/// success reporting zero. A storage failure during rollup recompute is
/// surfaced to the caller, but segments persisted before it stand — the
/// recompute is safely retried by any later batch touching the same date.
pub async fn ingest_batch(
    pool: &DbPool,
    event_bus: &EventBus,
    user_id: DbId,
    reports: &[SegmentReport],
) -> AppResult<usize> {
    if reports.is_empty() {
        return Ok(0);
    }

    let mut accepted = 0usize;
    let mut touched_dates: BTreeSet<DayDate> = BTreeSet::new();

    for report in reports {
        let Some(segment) = report.normalize(user_id) else {
            tracing::debug!(user_id, "Skipping invalid segment report");
            continue;
        };

        match SegmentRepo::create(pool, &segment).await {
            Ok(_) => {
                touched_dates.insert(segment.date);
                accepted += 1;
            }
            Err(e) => {
                // Partial-failure semantics: one failed insert does not
                // abort the batch.
                tracing::warn!(user_id, error = %e, "Failed to persist segment, skipping");
            }
        }
    }

    if accepted > 0 {
        // First accepted batch from this user marks their agent as
        // configured; the update is idempotent and ancillary.
        match UserRepo::mark_agent_configured(pool, user_id).await {
            Ok(true) => tracing::info!(user_id, "Marked agent as configured"),
            Ok(false) => {}
            Err(e) => tracing::warn!(user_id, error = %e, "Failed to update agent flag"),
        }
    }

    for date in &touched_dates {
        aggregation::recompute_daily(pool, user_id, *date).await?;
    }

    let mut notified = 0;
    if accepted > 0 {
        notified = event_bus.publish(MonitorEvent::segments_ingested(user_id, accepted));
    }

    tracing::info!(
        user_id,
        received = reports.len(),
        accepted,
        dates = touched_dates.len(),
        notified,
        "Ingested segment batch"
    );

    Ok(accepted)
}
