use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use pulseboard_core::rollup::{AppUsage, DailyTotals};
use pulseboard_core::types::SegmentKind;
use pulseboard_db::models::segment::NewActivitySegment;
use pulseboard_db::repositories::{AggregationRepo, AuditRepo, SegmentRepo, UserRepo};
use sqlx::PgPool;

/// Insert a user row and return its id.
async fn seed_user(pool: &PgPool, email: &str, name: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (email, name, role) VALUES ($1, $2, 'employee') RETURNING id",
    )
    .bind(email)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Build an insertable active segment starting at the given hour.
fn segment(user_id: i64, date: NaiveDate, hour: u32, app: &str) -> NewActivitySegment {
    let start = Utc
        .with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0)
        .unwrap();
    NewActivitySegment {
        user_id,
        start_time: start,
        end_time: start + chrono::Duration::minutes(5),
        duration_secs: 300,
        segment_kind: SegmentKind::Active,
        app_name: app.to_string(),
        window_title: "editor".to_string(),
        mouse_moves: 10,
        mouse_clicks: 2,
        keystrokes: 50,
        scroll_events: 1,
        date,
    }
}

#[sqlx::test]
async fn segment_create_and_list_ordered_by_start_time(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com", "Ada").await;
    let date = day(2026, 8, 3);

    // Insert out of order; listing must come back start-time ascending.
    SegmentRepo::create(&pool, &segment(user_id, date, 14, "Editor"))
        .await
        .unwrap();
    SegmentRepo::create(&pool, &segment(user_id, date, 9, "Browser"))
        .await
        .unwrap();
    SegmentRepo::create(&pool, &segment(user_id, date, 11, "Terminal"))
        .await
        .unwrap();

    let segments = SegmentRepo::list_by_user_date(&pool, user_id, date)
        .await
        .unwrap();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].app_name, "Browser");
    assert_eq!(segments[1].app_name, "Terminal");
    assert_eq!(segments[2].app_name, "Editor");
    assert!(segments.windows(2).all(|w| w[0].start_time <= w[1].start_time));
}

#[sqlx::test]
async fn segment_list_is_scoped_to_user_and_date(pool: PgPool) {
    let ada = seed_user(&pool, "a@example.com", "Ada").await;
    let bob = seed_user(&pool, "b@example.com", "Bob").await;

    SegmentRepo::create(&pool, &segment(ada, day(2026, 8, 3), 9, "Editor"))
        .await
        .unwrap();
    SegmentRepo::create(&pool, &segment(ada, day(2026, 8, 4), 9, "Editor"))
        .await
        .unwrap();
    SegmentRepo::create(&pool, &segment(bob, day(2026, 8, 3), 9, "Editor"))
        .await
        .unwrap();

    let segments = SegmentRepo::list_by_user_date(&pool, ada, day(2026, 8, 3))
        .await
        .unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].user_id, ada);

    let empty = SegmentRepo::list_by_user_date(&pool, ada, day(2026, 8, 5))
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[sqlx::test]
async fn segment_insert_rejects_inverted_time_range(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com", "Ada").await;
    let date = day(2026, 8, 3);

    let mut seg = segment(user_id, date, 9, "Editor");
    seg.end_time = seg.start_time;

    // ck_segment_time_order requires end_time > start_time.
    let result = SegmentRepo::create(&pool, &seg).await;
    assert!(result.is_err());
}

#[sqlx::test]
async fn aggregation_upsert_creates_then_replaces_in_place(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com", "Ada").await;
    let date = day(2026, 8, 3);

    let first = DailyTotals {
        total_active_secs: 600,
        total_idle_secs: 120,
        total_keystrokes: 40,
        top_apps: vec![AppUsage {
            app_name: "Editor".to_string(),
            seconds: 600,
        }],
        ..Default::default()
    };
    let created = AggregationRepo::upsert(&pool, user_id, date, &first)
        .await
        .unwrap();
    assert_eq!(created.total_active_secs, 600);

    // Recompute with different totals replaces every column on the same row.
    let second = DailyTotals {
        total_active_secs: 900,
        total_idle_secs: 0,
        total_keystrokes: 75,
        ..Default::default()
    };
    let updated = AggregationRepo::upsert(&pool, user_id, date, &second)
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.total_active_secs, 900);
    assert_eq!(updated.total_idle_secs, 0);
    assert_eq!(updated.total_keystrokes, 75);
    assert_eq!(updated.top_apps, serde_json::json!([]));

    // Still exactly one row for the (user, date) key.
    let found = AggregationRepo::find_by_user_date(&pool, user_id, date)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
}

#[sqlx::test]
async fn aggregation_find_missing_returns_none(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com", "Ada").await;

    let found = AggregationRepo::find_by_user_date(&pool, user_id, day(2026, 8, 3))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[sqlx::test]
async fn aggregation_list_by_date_joins_names_and_sorts(pool: PgPool) {
    let zoe = seed_user(&pool, "z@example.com", "Zoe").await;
    let ada = seed_user(&pool, "a@example.com", "Ada").await;
    let date = day(2026, 8, 3);

    AggregationRepo::upsert(&pool, zoe, date, &DailyTotals::default())
        .await
        .unwrap();
    AggregationRepo::upsert(&pool, ada, date, &DailyTotals::default())
        .await
        .unwrap();
    // Different date must not appear in the listing.
    AggregationRepo::upsert(&pool, ada, day(2026, 8, 4), &DailyTotals::default())
        .await
        .unwrap();

    let listed = AggregationRepo::list_by_date(&pool, date).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].user_name, "Ada");
    assert_eq!(listed[1].user_name, "Zoe");
}

#[sqlx::test]
async fn user_agent_flag_flips_once(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com", "Ada").await;

    let before = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert!(!before.agent_configured);

    // First call flips the flag, the second is a no-op.
    assert!(UserRepo::mark_agent_configured(&pool, user_id).await.unwrap());
    assert!(!UserRepo::mark_agent_configured(&pool, user_id).await.unwrap());

    let after = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert!(after.agent_configured);
}

#[sqlx::test]
async fn user_find_missing_returns_none(pool: PgPool) {
    assert!(UserRepo::find_by_id(&pool, 424242).await.unwrap().is_none());
}

#[sqlx::test]
async fn audit_record_appends_entry(pool: PgPool) {
    let admin = seed_user(&pool, "admin@example.com", "Root").await;
    let target = seed_user(&pool, "a@example.com", "Ada").await;

    let entry = AuditRepo::record(
        &pool,
        admin,
        pulseboard_core::audit::action_types::VIEWED_EMPLOYEE_TIMELINE,
        target,
        "date=2026-08-03",
    )
    .await
    .unwrap();

    assert_eq!(entry.actor_id, admin);
    assert_eq!(entry.target_id, target);
    assert_eq!(entry.detail, "date=2026-08-03");
}
