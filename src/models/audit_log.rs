use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLog {
    pub id: i64,
    pub actor: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub changes: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}
