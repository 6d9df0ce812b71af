use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::non_empty;
use crate::models::candidate::{
    Candidate, CandidateChanges, NewCandidate, DEFAULT_CANDIDATE_STATUS,
};
use crate::repositories::ListFilter;
use crate::services::Page;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "crate::utils::validation::candidate_status"))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "crate::utils::validation::candidate_status"))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub search_term: Option<String>,
    pub status: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
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

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListResponse {
    pub items: Vec<CandidateResponse>,
    pub total_count: i64,
    pub skip: i64,
    pub take: i64,
}

impl From<CreateCandidatePayload> for NewCandidate {
    fn from(value: CreateCandidatePayload) -> Self {
        Self {
            first_name: value.first_name.trim().to_string(),
            last_name: value.last_name.trim().to_string(),
            email: value.email.trim().to_lowercase(),
            phone: value.phone,
            skills: value.skills,
            description: value.description,
            status: value
                .status
                .unwrap_or_else(|| DEFAULT_CANDIDATE_STATUS.to_string()),
        }
    }
}

impl From<UpdateCandidatePayload> for CandidateChanges {
    fn from(value: UpdateCandidatePayload) -> Self {
        Self {
            first_name: value.first_name.map(|v| v.trim().to_string()),
            last_name: value.last_name.map(|v| v.trim().to_string()),
            email: value.email.map(|v| v.trim().to_lowercase()),
            phone: value.phone,
            skills: value.skills,
            description: value.description,
            status: value.status,
        }
    }
}

impl From<Candidate> for CandidateResponse {
    fn from(value: Candidate) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            skills: value.skills,
            description: value.description,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Page<Candidate>> for CandidateListResponse {
    fn from(value: Page<Candidate>) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total_count: value.total_count,
            skip: value.skip,
            take: value.take,
        }
    }
}

impl CandidateListQuery {
    pub fn filter(&self) -> ListFilter {
        ListFilter {
            search_term: non_empty(self.search_term.clone()),
            status: non_empty(self.status.clone()),
        }
    }
}
