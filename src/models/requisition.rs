use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Requisition {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub priority: Option<String>,
    pub is_draft: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const REQUISITION_STATUSES: [&str; 4] = ["Open", "Closed", "On Hold", "Cancelled"];

pub const DEFAULT_REQUISITION_STATUS: &str = "Open";

#[derive(Debug, Clone)]
pub struct NewRequisition {
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub priority: Option<String>,
    pub is_draft: bool,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct RequisitionChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub priority: Option<String>,
    pub is_draft: Option<bool>,
    pub status: Option<String>,
}
