use axum::Json;
use utoipa::OpenApi;

use crate::dto::{
    application_dto::{
        ApplicationListResponse, ApplicationResponse, ApplicationSummaryResponse,
        ChangeStatusPayload, CorrectStageHistoryPayload, CreateApplicationPayload,
        MoveStagePayload, StageCountResponse, StageHistoryResponse, StageMoveResponse,
        UpdateApplicationPayload,
    },
    audit_dto::AuditLogResponse,
    candidate_dto::{
        CandidateListResponse, CandidateResponse, CreateCandidatePayload, UpdateCandidatePayload,
    },
    requisition_dto::{
        CreateRequisitionPayload, RequisitionListResponse, RequisitionResponse,
        UpdateRequisitionPayload,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Hiring Pipeline API", description = "Candidates, requisitions and the application stage workflow"),
    paths(
        super::application::create_application,
        super::application::get_application,
        super::application::update_application,
        super::application::move_stage,
        super::application::change_status,
        super::application::get_history,
        super::application::search_applications,
        super::application::stage_counts,
        super::application::delete_application,
        super::candidate::create_candidate,
        super::candidate::get_candidate,
        super::candidate::list_candidates,
        super::candidate::update_candidate,
        super::candidate::delete_candidate,
        super::requisition::create_requisition,
        super::requisition::get_requisition,
        super::requisition::list_requisitions,
        super::requisition::update_requisition,
        super::requisition::delete_requisition,
        super::admin::get_stage_history,
        super::admin::correct_stage_history,
        super::admin::list_audit_logs,
    ),
    components(schemas(
        CreateApplicationPayload,
        UpdateApplicationPayload,
        MoveStagePayload,
        ChangeStatusPayload,
        CorrectStageHistoryPayload,
        ApplicationResponse,
        ApplicationSummaryResponse,
        ApplicationListResponse,
        StageHistoryResponse,
        StageMoveResponse,
        StageCountResponse,
        CreateCandidatePayload,
        UpdateCandidatePayload,
        CandidateResponse,
        CandidateListResponse,
        CreateRequisitionPayload,
        UpdateRequisitionPayload,
        RequisitionResponse,
        RequisitionListResponse,
        AuditLogResponse,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
