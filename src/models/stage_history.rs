use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StageHistory {
    pub id: i64,
    pub application_id: i64,
    pub from_stage: Option<String>,
    pub to_stage: String,
    pub moved_by: String,
    pub moved_at: DateTime<Utc>,
}

/// Field corrections for the repair path. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct StageHistoryCorrection {
    pub from_stage: Option<String>,
    pub to_stage: Option<String>,
    pub moved_by: Option<String>,
    pub moved_at: Option<DateTime<Utc>>,
}
