//! Administrative helpers for fixtures. Not exposed over HTTP.

use crate::error::Result;
use sqlx::PgPool;

/// Empties the pipeline tables and restarts every identity sequence at 1.
pub async fn reset_identity_seeds(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "TRUNCATE TABLE stage_histories, applications, requisitions, candidates, audit_logs
         RESTART IDENTITY CASCADE",
    )
    .execute(pool)
    .await?;
    tracing::warn!("pipeline tables truncated and identity seeds reset");
    Ok(())
}
