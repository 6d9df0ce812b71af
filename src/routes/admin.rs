//! Administrative endpoints: stage-history repair and the audit trail.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::{
        application_dto::{CorrectStageHistoryPayload, StageHistoryResponse},
        audit_dto::{AuditLogQuery, AuditLogResponse},
    },
    error::Result,
    middleware::auth::Claims,
    models::stage_history::StageHistoryCorrection,
    utils::extract::{AppJson, AppPath, AppQuery},
    AppState,
};

#[utoipa::path(
    get,
    path = "/stage-history/{id}",
    params(
        ("id" = i64, Path, description = "Stage history entry ID")
    ),
    responses(
        (status = 200, description = "History entry", body = StageHistoryResponse),
        (status = 404, description = "History entry not found")
    )
)]
#[axum::debug_handler]
pub async fn get_stage_history(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse> {
    let entry = state.application_service.get_history_entry(id).await?;
    Ok(Json(StageHistoryResponse::from(entry)))
}

#[utoipa::path(
    put,
    path = "/stage-history/{id}",
    params(
        ("id" = i64, Path, description = "Stage history entry ID")
    ),
    request_body = CorrectStageHistoryPayload,
    responses(
        (status = 200, description = "History entry corrected", body = StageHistoryResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "History entry not found")
    )
)]
#[axum::debug_handler]
pub async fn correct_stage_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CorrectStageHistoryPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let changes = json!(payload);
    let correction = StageHistoryCorrection::from(payload);
    let entry = state
        .application_service
        .correct_history_entry(id, &correction)
        .await?;
    state
        .audit_service
        .record(Some(&claims.sub), "correct", "stage_history", id, Some(changes))
        .await;
    Ok(Json(StageHistoryResponse::from(entry)))
}

#[utoipa::path(
    get,
    path = "/audit-logs",
    params(
        ("entityType" = Option<String>, Query, description = "Filter by entity type"),
        ("entityId" = Option<i64>, Query, description = "Filter by entity ID"),
        ("limit" = Option<i64>, Query, description = "Maximum entries, at most 500")
    ),
    responses(
        (status = 200, description = "Audit entries, newest first", body = [AuditLogResponse])
    )
)]
#[axum::debug_handler]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AuditLogQuery>,
) -> Result<impl IntoResponse> {
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let entries = state
        .audit_service
        .list(query.entity_type.as_deref(), query.entity_id, limit)
        .await?;
    let items: Vec<AuditLogResponse> = entries.into_iter().map(Into::into).collect();
    Ok(Json(items))
}
