use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const CANDIDATE_STATUSES: [&str; 9] = [
    "Applied",
    "Screening",
    "Interview",
    "TechnicalAssessment",
    "ReferenceCheck",
    "Offer",
    "Hired",
    "Rejected",
    "Withdrawn",
];

pub const DEFAULT_CANDIDATE_STATUS: &str = "Applied";

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub description: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct CandidateChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}
