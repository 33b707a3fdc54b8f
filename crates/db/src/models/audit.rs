//! Audit entry entity model.
//!
//! Audit entries are immutable records of privileged reads; there is no
//! update DTO and no `updated_at` column.

use pulseboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `audit_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditEntry {
    pub id: DbId,
    /// The admin who performed the privileged read.
    pub actor_id: DbId,
    /// Action tag, one of `pulseboard_core::audit::action_types`.
    pub action: String,
    /// The user whose data was read.
    pub target_id: DbId,
    /// Free-text detail, e.g. `date=2026-08-03`.
    pub detail: String,
    pub created_at: Timestamp,
}
