//! Activity segment entity model and DTOs.

use chrono::{DateTime, Local, Utc};
use pulseboard_core::privacy;
use pulseboard_core::rollup::SegmentView;
use pulseboard_core::types::{DayDate, DbId, SegmentKind, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `activity_segments` table.
///
/// Segments are append-only: created once per accepted report, never
/// mutated or deleted by this subsystem.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivitySegment {
    pub id: DbId,
    pub user_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub duration_secs: i32,
    pub segment_kind: String,
    pub app_name: String,
    pub window_title: String,
    pub mouse_moves: i32,
    pub mouse_clicks: i32,
    pub keystrokes: i32,
    pub scroll_events: i32,
    pub date: DayDate,
    pub created_at: Timestamp,
}

impl ActivitySegment {
    /// Borrowed view for the rollup computation.
    ///
    /// Returns `None` for rows whose kind is not one of the enumerated
    /// kinds (cannot happen for rows written through ingestion, which
    /// rejects unknown kinds).
    pub fn view(&self) -> Option<SegmentView<'_>> {
        Some(SegmentView {
            kind: SegmentKind::parse(&self.segment_kind)?,
            app_name: &self.app_name,
            duration_secs: self.duration_secs,
            mouse_moves: self.mouse_moves,
            mouse_clicks: self.mouse_clicks,
            keystrokes: self.keystrokes,
            scroll_events: self.scroll_events,
        })
    }
}

/// One raw segment report from the desktop agent, pre-validation.
///
/// Timestamps arrive as RFC 3339 strings with sub-second precision and an
/// explicit offset. The kind arrives as a plain string so a single report
/// with an unknown kind is rejected individually instead of failing
/// deserialization of the whole batch.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SegmentReport {
    pub start_time: String,
    pub end_time: String,
    pub segment_kind: String,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub window_title: String,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub mouse_moves: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub mouse_clicks: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub keystrokes: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub scroll_events: i32,
}

/// Values for inserting one accepted segment.
#[derive(Debug, Clone)]
pub struct NewActivitySegment {
    pub user_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub duration_secs: i32,
    pub segment_kind: SegmentKind,
    pub app_name: String,
    pub window_title: String,
    pub mouse_moves: i32,
    pub mouse_clicks: i32,
    pub keystrokes: i32,
    pub scroll_events: i32,
    pub date: DayDate,
}

impl SegmentReport {
    /// Validate and normalize one report into an insertable segment.
    ///
    /// Returns `None` when the report is invalid (unparseable timestamps,
    /// end not strictly after start, unknown kind, negative counters).
    /// Invalid reports are skipped by the pipeline; they never abort the
    /// batch.
    ///
    /// Normalization:
    /// - duration = end − start, rounded to whole seconds
    /// - date = calendar date of start in the server's local time zone
    /// - window title passed through the privacy filter
    pub fn normalize(&self, user_id: DbId) -> Option<NewActivitySegment> {
        if self.validate().is_err() {
            return None;
        }

        let kind = SegmentKind::parse(&self.segment_kind)?;
        let start: Timestamp = DateTime::parse_from_rfc3339(&self.start_time)
            .ok()?
            .with_timezone(&Utc);
        let end: Timestamp = DateTime::parse_from_rfc3339(&self.end_time)
            .ok()?
            .with_timezone(&Utc);

        if end <= start {
            return None;
        }

        let duration_ms = (end - start).num_milliseconds();
        let duration_secs = ((duration_ms as f64) / 1000.0).round() as i32;
        let date = start.with_timezone(&Local).date_naive();

        Some(NewActivitySegment {
            user_id,
            start_time: start,
            end_time: end,
            duration_secs,
            segment_kind: kind,
            app_name: self.app_name.clone(),
            window_title: privacy::filter_window_title(&self.window_title),
            mouse_moves: self.mouse_moves,
            mouse_clicks: self.mouse_clicks,
            keystrokes: self.keystrokes,
            scroll_events: self.scroll_events,
            date,
        })
    }
}
