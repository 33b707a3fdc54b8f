use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date used as the daily rollup partition key.
///
/// Derived from a segment's start time in the ingesting process's local
/// time zone; stored as a SQL `DATE`.
pub type DayDate = chrono::NaiveDate;

/// Kind of activity covered by a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Active,
    Idle,
    AppUsage,
}

impl SegmentKind {
    /// Canonical lowercase form, as stored in the `segment_kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Active => "active",
            SegmentKind::Idle => "idle",
            SegmentKind::AppUsage => "app_usage",
        }
    }

    /// Parse the stored column value back into a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SegmentKind::Active),
            "idle" => Some(SegmentKind::Idle),
            "app_usage" => Some(SegmentKind::AppUsage),
            _ => None,
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role names used by the authorization layer.
pub mod roles {
    pub const ROLE_ADMIN: &str = "admin";
    pub const ROLE_EMPLOYEE: &str = "employee";
}
