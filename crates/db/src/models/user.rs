//! User entity model (interface surface only).
//!
//! Accounts are owned by an external collaborator; this subsystem reads
//! `role`/`name` and idempotently flips `agent_configured`.

use pulseboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
    /// Set to true on the first accepted segment batch from this user.
    pub agent_configured: bool,
    pub created_at: Timestamp,
}
