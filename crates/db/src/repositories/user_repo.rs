//! Repository for the subsystem's slice of the `users` table.

use pulseboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, role, agent_configured, created_at";

/// Read access plus the one flag write this subsystem owns.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by their internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark the user's desktop agent as configured.
    ///
    /// Idempotent: only rows where the flag is still false are touched.
    /// Returns true if this call flipped the flag.
    pub async fn mark_agent_configured(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET agent_configured = TRUE
             WHERE id = $1 AND agent_configured = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
