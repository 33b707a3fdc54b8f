//! Repository for the `audit_entries` table.

use pulseboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::audit::AuditEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, actor_id, action, target_id, detail, created_at";

/// Provides append and query operations for the audit trail.
///
/// Entries are append-only; there are no update or delete methods.
pub struct AuditRepo;

impl AuditRepo {
    /// Append one audit entry recording a privileged read.
    ///
    /// Callers treat this as fire-and-forget relative to the read it
    /// documents: log the error, never fail the read.
    pub async fn record(
        pool: &PgPool,
        actor_id: DbId,
        action: &str,
        target_id: DbId,
        detail: &str,
    ) -> Result<AuditEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_entries (actor_id, action, target_id, detail)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditEntry>(&query)
            .bind(actor_id)
            .bind(action)
            .bind(target_id)
            .bind(detail)
            .fetch_one(pool)
            .await
    }
}
