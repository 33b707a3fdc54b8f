//! Pure daily rollup computation.
//!
//! The aggregation engine feeds every segment for one (user, date) through
//! [`compute_daily_totals`] and persists the result wholesale. Keeping the
//! computation pure (no I/O) makes the recompute trivially idempotent: the
//! same segment set always produces the same [`DailyTotals`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::SegmentKind;

/// Maximum number of entries in the top-applications ranking.
pub const TOP_APPS_LIMIT: usize = 10;

/// Borrowed view of one segment, decoupled from the storage row type.
#[derive(Debug, Clone, Copy)]
pub struct SegmentView<'a> {
    pub kind: SegmentKind,
    pub app_name: &'a str,
    pub duration_secs: i32,
    pub mouse_moves: i32,
    pub mouse_clicks: i32,
    pub keystrokes: i32,
    pub scroll_events: i32,
}

/// One entry in the top-applications ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUsage {
    pub app_name: String,
    pub seconds: i64,
}

/// Computed rollup for one (user, date).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyTotals {
    pub total_active_secs: i64,
    pub total_idle_secs: i64,
    pub total_mouse_moves: i64,
    pub total_mouse_clicks: i64,
    pub total_keystrokes: i64,
    pub total_scroll_events: i64,
    /// Active-duration ranking, at most [`TOP_APPS_LIMIT`] entries,
    /// seconds descending with name-ascending tie-break.
    pub top_apps: Vec<AppUsage>,
}

/// Compute the full daily rollup from scratch over one day's segments.
///
/// - Active segments contribute duration and input counters.
/// - Idle segments contribute duration only.
/// - The top-apps ranking covers active segments with a non-empty app name.
///
/// Ordering of the input does not affect the output.
pub fn compute_daily_totals<'a, I>(segments: I) -> DailyTotals
where
    I: IntoIterator<Item = SegmentView<'a>>,
{
    let mut totals = DailyTotals::default();
    // BTreeMap keeps app names sorted, which gives the name-ascending
    // tie-break for free under a stable sort by seconds.
    let mut app_durations: BTreeMap<&str, i64> = BTreeMap::new();

    for seg in segments {
        match seg.kind {
            SegmentKind::Active => {
                totals.total_active_secs += i64::from(seg.duration_secs);
                totals.total_mouse_moves += i64::from(seg.mouse_moves);
                totals.total_mouse_clicks += i64::from(seg.mouse_clicks);
                totals.total_keystrokes += i64::from(seg.keystrokes);
                totals.total_scroll_events += i64::from(seg.scroll_events);

                if !seg.app_name.is_empty() {
                    *app_durations.entry(seg.app_name).or_insert(0) +=
                        i64::from(seg.duration_secs);
                }
            }
            SegmentKind::Idle => {
                totals.total_idle_secs += i64::from(seg.duration_secs);
            }
            SegmentKind::AppUsage => {}
        }
    }

    let mut ranked: Vec<AppUsage> = app_durations
        .into_iter()
        .map(|(name, seconds)| AppUsage {
            app_name: name.to_string(),
            seconds,
        })
        .collect();
    // Stable sort: equal-seconds entries stay in name order.
    ranked.sort_by(|a, b| b.seconds.cmp(&a.seconds));
    ranked.truncate(TOP_APPS_LIMIT);
    totals.top_apps = ranked;

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(app: &str, secs: i32) -> SegmentView<'_> {
        SegmentView {
            kind: SegmentKind::Active,
            app_name: app,
            duration_secs: secs,
            mouse_moves: 0,
            mouse_clicks: 0,
            keystrokes: 0,
            scroll_events: 0,
        }
    }

    fn idle(secs: i32) -> SegmentView<'static> {
        SegmentView {
            kind: SegmentKind::Idle,
            app_name: "",
            duration_secs: secs,
            mouse_moves: 0,
            mouse_clicks: 0,
            keystrokes: 0,
            scroll_events: 0,
        }
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        let totals = compute_daily_totals(std::iter::empty());
        assert_eq!(totals, DailyTotals::default());
    }

    #[test]
    fn active_and_idle_durations_are_kept_separate() {
        let totals = compute_daily_totals(vec![active("Editor", 300), idle(120)]);
        assert_eq!(totals.total_active_secs, 300);
        assert_eq!(totals.total_idle_secs, 120);
        assert_eq!(totals.top_apps, vec![AppUsage {
            app_name: "Editor".to_string(),
            seconds: 300,
        }]);
    }

    #[test]
    fn counters_sum_over_active_segments_only() {
        let mut seg = active("Editor", 60);
        seg.keystrokes = 50;
        seg.mouse_moves = 10;
        let mut idle_seg = idle(60);
        idle_seg.keystrokes = 99; // should be ignored

        let totals = compute_daily_totals(vec![seg, idle_seg]);
        assert_eq!(totals.total_keystrokes, 50);
        assert_eq!(totals.total_mouse_moves, 10);
    }

    #[test]
    fn app_usage_kind_contributes_nothing() {
        let seg = SegmentView {
            kind: SegmentKind::AppUsage,
            app_name: "Browser",
            duration_secs: 500,
            mouse_moves: 1,
            mouse_clicks: 1,
            keystrokes: 1,
            scroll_events: 1,
        };
        let totals = compute_daily_totals(vec![seg]);
        assert_eq!(totals, DailyTotals::default());
    }

    #[test]
    fn top_apps_ranks_by_duration_with_name_tiebreak() {
        let totals = compute_daily_totals(vec![
            active("appA", 120),
            active("appC", 300),
            active("appB", 300),
        ]);
        let names: Vec<&str> = totals.top_apps.iter().map(|a| a.app_name.as_str()).collect();
        assert_eq!(names, vec!["appB", "appC", "appA"]);
    }

    #[test]
    fn top_apps_excludes_empty_names_and_groups_repeats() {
        let totals = compute_daily_totals(vec![
            active("Editor", 100),
            active("Editor", 200),
            active("", 400),
        ]);
        assert_eq!(totals.top_apps, vec![AppUsage {
            app_name: "Editor".to_string(),
            seconds: 300,
        }]);
        // Anonymous duration still counts toward the active total.
        assert_eq!(totals.total_active_secs, 700);
    }

    #[test]
    fn top_apps_truncates_to_limit() {
        let names: Vec<String> = (0..15).map(|i| format!("app{i:02}")).collect();
        let segments: Vec<SegmentView<'_>> = names
            .iter()
            .enumerate()
            .map(|(i, n)| active(n, 100 + i as i32))
            .collect();
        let totals = compute_daily_totals(segments);
        assert_eq!(totals.top_apps.len(), TOP_APPS_LIMIT);
        // Highest durations survive the cut.
        assert_eq!(totals.top_apps[0].app_name, "app14");
    }

    #[test]
    fn recompute_is_order_independent() {
        let forward = compute_daily_totals(vec![active("A", 10), active("B", 20), idle(5)]);
        let reversed = compute_daily_totals(vec![idle(5), active("B", 20), active("A", 10)]);
        assert_eq!(forward, reversed);
    }
}
