//! End-to-end ingestion tests against a live database.
//!
//! Each test drives `ingest_batch` the way the handler does: raw reports
//! in, segments + rollup + monitor event out.

use chrono::Local;
use pulseboard_api::{aggregation, ingest};
use pulseboard_db::models::segment::SegmentReport;
use pulseboard_db::repositories::{AggregationRepo, SegmentRepo, UserRepo};
use pulseboard_events::EventBus;
use sqlx::PgPool;

/// Insert a user row and return its id.
async fn seed_user(pool: &PgPool) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (email, name, role) VALUES ('a@example.com', 'Ada', 'employee') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

fn report(start: &str, end: &str, kind: &str, app: &str, keystrokes: i32) -> SegmentReport {
    SegmentReport {
        start_time: start.to_string(),
        end_time: end.to_string(),
        segment_kind: kind.to_string(),
        app_name: app.to_string(),
        window_title: String::new(),
        mouse_moves: 0,
        mouse_clicks: 0,
        keystrokes,
        scroll_events: 0,
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn batch_flows_through_to_rollup_and_event(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let bus = EventBus::default();
    let mut events = bus.subscribe();

    let reports = vec![
        report(
            "2026-08-03T10:00:00Z",
            "2026-08-03T10:05:00Z",
            "active",
            "Editor",
            50,
        ),
        report("2026-08-03T10:05:00Z", "2026-08-03T10:07:00Z", "idle", "", 0),
    ];

    let accepted = ingest::ingest_batch(&pool, &bus, user_id, &reports)
        .await
        .unwrap();
    assert_eq!(accepted, 2);

    // Rollup is keyed by the local calendar date of each start time.
    let date = chrono::DateTime::parse_from_rfc3339("2026-08-03T10:00:00Z")
        .unwrap()
        .with_timezone(&Local)
        .date_naive();

    let rollup = AggregationRepo::find_by_user_date(&pool, user_id, date)
        .await
        .unwrap()
        .expect("rollup row should exist after ingestion");
    assert_eq!(rollup.total_active_secs, 300);
    assert_eq!(rollup.total_idle_secs, 120);
    assert_eq!(rollup.total_keystrokes, 50);
    assert_eq!(
        rollup.top_apps,
        serde_json::json!([{"app_name": "Editor", "seconds": 300}])
    );

    // Exactly one MonitorEvent for the batch.
    let event = events.try_recv().expect("one monitor event should be published");
    assert_eq!(event.event_type, "segments");
    assert_eq!(event.data["user_id"], user_id);
    assert_eq!(event.data["received"], 2);
    assert!(events.try_recv().is_err(), "no second event for one batch");

    // First accepted batch flips the agent flag.
    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert!(user.agent_configured);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_reports_are_skipped_without_trace(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let bus = EventBus::default();

    let reports = vec![
        report(
            "2026-08-03T09:00:00Z",
            "2026-08-03T09:10:00Z",
            "active",
            "Browser",
            5,
        ),
        // End before start.
        report(
            "2026-08-03T11:00:00Z",
            "2026-08-03T10:00:00Z",
            "active",
            "Editor",
            5,
        ),
        // Unknown kind.
        report(
            "2026-08-03T12:00:00Z",
            "2026-08-03T12:05:00Z",
            "meeting",
            "Editor",
            5,
        ),
        // Unparseable timestamp.
        report("yesterday", "2026-08-03T13:00:00Z", "active", "Editor", 5),
    ];

    let accepted = ingest::ingest_batch(&pool, &bus, user_id, &reports)
        .await
        .unwrap();
    assert_eq!(accepted, 1);

    let date = chrono::DateTime::parse_from_rfc3339("2026-08-03T09:00:00Z")
        .unwrap()
        .with_timezone(&Local)
        .date_naive();
    let segments = SegmentRepo::list_by_user_date(&pool, user_id, date)
        .await
        .unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].app_name, "Browser");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_batch_is_a_noop_success(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let bus = EventBus::default();
    let mut events = bus.subscribe();

    let accepted = ingest::ingest_batch(&pool, &bus, user_id, &[]).await.unwrap();
    assert_eq!(accepted, 0);

    // No event, no agent flag flip.
    assert!(events.try_recv().is_err());
    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert!(!user.agent_configured);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn recompute_is_idempotent(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let bus = EventBus::default();

    let reports = vec![report(
        "2026-08-03T10:00:00Z",
        "2026-08-03T10:05:00Z",
        "active",
        "Editor",
        50,
    )];
    ingest::ingest_batch(&pool, &bus, user_id, &reports)
        .await
        .unwrap();

    let date = chrono::DateTime::parse_from_rfc3339("2026-08-03T10:00:00Z")
        .unwrap()
        .with_timezone(&Local)
        .date_naive();

    // Re-running the recompute with no segment changes reproduces the
    // same rollup on the same row.
    let first = aggregation::recompute_daily(&pool, user_id, date)
        .await
        .unwrap();
    let second = aggregation::recompute_daily(&pool, user_id, date)
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.total_active_secs, first.total_active_secs);
    assert_eq!(second.total_idle_secs, first.total_idle_secs);
    assert_eq!(second.total_keystrokes, first.total_keystrokes);
    assert_eq!(second.top_apps, first.top_apps);
}
