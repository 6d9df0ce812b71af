use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::stage_history::StageHistory;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i64,
    pub candidate_id: i64,
    pub requisition_id: i64,
    pub current_stage: String,
    pub status: Option<String>,
    /// Row token, incremented on every write.
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Search row: an application joined with the names it is matched on.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationSummary {
    pub id: i64,
    pub candidate_id: i64,
    pub requisition_id: i64,
    pub current_stage: String,
    pub status: Option<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub candidate_first_name: String,
    pub candidate_last_name: String,
    pub candidate_email: String,
    pub requisition_title: String,
    pub requisition_department: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub candidate_id: i64,
    pub requisition_id: i64,
    pub current_stage: String,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stage change as handed to the store. `expected_version` is the version the
/// caller validated `from_stage` against.
#[derive(Debug, Clone, PartialEq)]
pub struct StageMove {
    pub application_id: i64,
    pub from_stage: String,
    pub to_stage: String,
    pub moved_by: String,
    pub moved_at: DateTime<Utc>,
    pub expected_version: i32,
    /// Written in the same transaction as the stage when present.
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StageMoveOutcome {
    pub application: Application,
    pub history: StageHistory,
}

/// Optional filters shared by the page query and the count query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationFilter {
    pub search_term: Option<String>,
    pub status: Option<String>,
    pub stage: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StageCount {
    pub stage: String,
    pub count: i64,
}
