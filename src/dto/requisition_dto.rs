use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::non_empty;
use crate::models::requisition::{
    NewRequisition, Requisition, RequisitionChanges, DEFAULT_REQUISITION_STATUS,
};
use crate::repositories::ListFilter;
use crate::services::Page;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequisitionPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub department: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub employment_type: Option<String>,
    #[validate(length(max = 50))]
    pub priority: Option<String>,
    #[serde(default)]
    pub is_draft: bool,
    #[validate(custom(function = "crate::utils::validation::requisition_status"))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequisitionPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub department: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub employment_type: Option<String>,
    #[validate(length(max = 50))]
    pub priority: Option<String>,
    pub is_draft: Option<bool>,
    #[validate(custom(function = "crate::utils::validation::requisition_status"))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RequisitionListQuery {
    pub search_term: Option<String>,
    pub status: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionResponse {
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

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionListResponse {
    pub items: Vec<RequisitionResponse>,
    pub total_count: i64,
    pub skip: i64,
    pub take: i64,
}

impl From<CreateRequisitionPayload> for NewRequisition {
    fn from(value: CreateRequisitionPayload) -> Self {
        Self {
            title: value.title.trim().to_string(),
            description: value.description,
            department: value.department,
            location: value.location,
            employment_type: value.employment_type,
            priority: value.priority,
            is_draft: value.is_draft,
            status: value
                .status
                .unwrap_or_else(|| DEFAULT_REQUISITION_STATUS.to_string()),
        }
    }
}

impl From<UpdateRequisitionPayload> for RequisitionChanges {
    fn from(value: UpdateRequisitionPayload) -> Self {
        Self {
            title: value.title.map(|v| v.trim().to_string()),
            description: value.description,
            department: value.department,
            location: value.location,
            employment_type: value.employment_type,
            priority: value.priority,
            is_draft: value.is_draft,
            status: value.status,
        }
    }
}

impl From<Requisition> for RequisitionResponse {
    fn from(value: Requisition) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            department: value.department,
            location: value.location,
            employment_type: value.employment_type,
            priority: value.priority,
            is_draft: value.is_draft,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Page<Requisition>> for RequisitionListResponse {
    fn from(value: Page<Requisition>) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total_count: value.total_count,
            skip: value.skip,
            take: value.take,
        }
    }
}

impl RequisitionListQuery {
    pub fn filter(&self) -> ListFilter {
        ListFilter {
            search_term: non_empty(self.search_term.clone()),
            status: non_empty(self.status.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requisition_defaults_to_open_and_not_draft() {
        let payload: CreateRequisitionPayload =
            serde_json::from_value(json!({"title": "Backend Engineer"})).unwrap();
        assert!(payload.validate().is_ok());
        let requisition = NewRequisition::from(payload);
        assert_eq!(requisition.status, "Open");
        assert!(!requisition.is_draft);
    }

    #[test]
    fn on_hold_is_a_valid_status() {
        let payload: UpdateRequisitionPayload =
            serde_json::from_value(json!({"status": "On Hold"})).unwrap();
        assert!(payload.validate().is_ok());
    }
}
