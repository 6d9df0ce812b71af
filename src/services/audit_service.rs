use crate::error::Result;
use crate::models::audit_log::AuditLog;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

const AUDIT_COLUMNS: &str = "id, actor, action, entity_type, entity_id, changes, created_at";

#[derive(Clone)]
pub struct AuditService {
    pool: PgPool,
}

impl AuditService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn log(
        &self,
        actor: Option<&str>,
        action: &str,
        entity_type: &str,
        entity_id: i64,
        changes: Option<JsonValue>,
    ) -> Result<AuditLog> {
        let query = format!(
            "INSERT INTO audit_logs (actor, action, entity_type, entity_id, changes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {AUDIT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AuditLog>(&query)
            .bind(actor)
            .bind(action)
            .bind(entity_type)
            .bind(entity_id)
            .bind(changes)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Like [`AuditService::log`] but never fails the caller.
    pub async fn record(
        &self,
        actor: Option<&str>,
        action: &str,
        entity_type: &str,
        entity_id: i64,
        changes: Option<JsonValue>,
    ) {
        if let Err(e) = self.log(actor, action, entity_type, entity_id, changes).await {
            tracing::warn!(error = %e, action, entity_type, entity_id, "failed to write audit log");
        }
    }

    pub async fn list(
        &self,
        entity_type: Option<&str>,
        entity_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<AuditLog>> {
        let query = format!(
            "SELECT {AUDIT_COLUMNS} FROM audit_logs
             WHERE ($1::text IS NULL OR entity_type = $1)
               AND ($2::bigint IS NULL OR entity_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3"
        );
        let rows = sqlx::query_as::<_, AuditLog>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
