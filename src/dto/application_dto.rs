use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::non_empty;
use crate::models::application::{
    Application, ApplicationFilter, ApplicationSummary, StageCount, StageMoveOutcome,
};
use crate::models::stage_history::{StageHistory, StageHistoryCorrection};
use crate::services::Page;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    #[validate(range(min = 1))]
    pub candidate_id: i64,
    #[validate(range(min = 1))]
    pub requisition_id: i64,
    #[validate(length(max = 100))]
    pub current_stage: Option<String>,
    #[validate(length(max = 100))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationPayload {
    #[validate(length(min = 1, max = 100))]
    pub current_stage: Option<String>,
    #[validate(length(max = 100))]
    pub status: Option<String>,
    pub expected_version: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveStagePayload {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "crate::utils::validation::not_blank")
    )]
    pub to_stage: String,
    /// Defaults to the authenticated user.
    #[validate(
        length(min = 1, max = 255),
        custom(function = "crate::utils::validation::not_blank")
    )]
    pub moved_by: Option<String>,
    pub expected_version: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusPayload {
    #[validate(length(min = 1, max = 100))]
    pub status: String,
    pub expected_version: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorrectStageHistoryPayload {
    #[validate(length(min = 1, max = 100))]
    pub from_stage: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub to_stage: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub moved_by: Option<String>,
    pub moved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationSearchQuery {
    pub search_term: Option<String>,
    pub status: Option<String>,
    pub stage: Option<String>,
    pub department: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: i64,
    pub candidate_id: i64,
    pub requisition_id: i64,
    pub current_stage: String,
    pub status: Option<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummaryResponse {
    pub id: i64,
    pub candidate_id: i64,
    pub candidate_name: String,
    pub candidate_email: String,
    pub requisition_id: i64,
    pub requisition_title: String,
    pub department: Option<String>,
    pub current_stage: String,
    pub status: Option<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListResponse {
    pub items: Vec<ApplicationSummaryResponse>,
    pub total_count: i64,
    pub skip: i64,
    pub take: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageHistoryResponse {
    pub id: i64,
    pub application_id: i64,
    pub from_stage: Option<String>,
    pub to_stage: String,
    pub moved_by: String,
    pub moved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageMoveResponse {
    pub application: ApplicationResponse,
    pub history: StageHistoryResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StageCountResponse {
    pub stage: String,
    pub count: i64,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            requisition_id: value.requisition_id,
            current_stage: value.current_stage,
            status: value.status,
            version: value.version,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<ApplicationSummary> for ApplicationSummaryResponse {
    fn from(value: ApplicationSummary) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            candidate_name: format!(
                "{} {}",
                value.candidate_first_name, value.candidate_last_name
            ),
            candidate_email: value.candidate_email,
            requisition_id: value.requisition_id,
            requisition_title: value.requisition_title,
            department: value.requisition_department,
            current_stage: value.current_stage,
            status: value.status,
            version: value.version,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Page<ApplicationSummary>> for ApplicationListResponse {
    fn from(value: Page<ApplicationSummary>) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total_count: value.total_count,
            skip: value.skip,
            take: value.take,
        }
    }
}

impl From<StageHistory> for StageHistoryResponse {
    fn from(value: StageHistory) -> Self {
        Self {
            id: value.id,
            application_id: value.application_id,
            from_stage: value.from_stage,
            to_stage: value.to_stage,
            moved_by: value.moved_by,
            moved_at: value.moved_at,
        }
    }
}

impl From<StageMoveOutcome> for StageMoveResponse {
    fn from(value: StageMoveOutcome) -> Self {
        Self {
            application: value.application.into(),
            history: value.history.into(),
        }
    }
}

impl From<StageCount> for StageCountResponse {
    fn from(value: StageCount) -> Self {
        Self {
            stage: value.stage,
            count: value.count,
        }
    }
}

impl From<ApplicationSearchQuery> for ApplicationFilter {
    fn from(value: ApplicationSearchQuery) -> Self {
        Self {
            search_term: non_empty(value.search_term),
            status: non_empty(value.status),
            stage: non_empty(value.stage),
            department: non_empty(value.department),
        }
    }
}

impl From<CorrectStageHistoryPayload> for StageHistoryCorrection {
    fn from(value: CorrectStageHistoryPayload) -> Self {
        Self {
            from_stage: value.from_stage,
            to_stage: value.to_stage,
            moved_by: value.moved_by,
            moved_at: value.moved_at,
        }
    }
}
