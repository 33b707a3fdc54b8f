//! Audit action-type constants.
//!
//! This module lives in `core` (zero internal deps) so both the API layer
//! and any future tooling name privileged-read actions consistently.

/// Known action types for audit entries.
pub mod action_types {
    /// An admin fetched another user's raw segments for a date.
    pub const VIEWED_TIMELINE: &str = "viewed_timeline";
    /// An admin fetched another user's combined timeline (segments + rollup).
    pub const VIEWED_EMPLOYEE_TIMELINE: &str = "viewed_employee_timeline";
}
