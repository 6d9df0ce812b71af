use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::models::audit_log::AuditLog;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditLogQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogResponse {
    pub id: i64,
    pub actor: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    #[schema(value_type = Option<Object>)]
    pub changes: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLog> for AuditLogResponse {
    fn from(value: AuditLog) -> Self {
        Self {
            id: value.id,
            actor: value.actor,
            action: value.action,
            entity_type: value.entity_type,
            entity_id: value.entity_id,
            changes: value.changes,
            created_at: value.created_at,
        }
    }
}
