use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::{
        application_dto::{
            ApplicationListResponse, ApplicationResponse, ApplicationSearchQuery,
            ChangeStatusPayload, CreateApplicationPayload, MoveStagePayload,
            StageCountResponse, StageHistoryResponse, StageMoveResponse,
            UpdateApplicationPayload,
        },
        page_window,
    },
    error::Result,
    middleware::auth::Claims,
    models::application::ApplicationFilter,
    utils::extract::{AppJson, AppPath, AppQuery},
    AppState,
};

const ENTITY: &str = "application";

#[utoipa::path(
    post,
    path = "/applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Candidate or requisition not found")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .create(
            payload.candidate_id,
            payload.requisition_id,
            payload.current_stage,
            payload.status,
        )
        .await?;
    state
        .audit_service
        .record(
            Some(&claims.sub),
            "create",
            ENTITY,
            application.id,
            Some(json!({
                "candidateId": application.candidate_id,
                "requisitionId": application.requisition_id,
                "currentStage": application.current_stage,
            })),
        )
        .await;
    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(application))))
}

#[utoipa::path(
    get,
    path = "/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = ApplicationResponse),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get(id).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    put,
    path = "/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 403, description = "Stage transition not allowed"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application was modified concurrently")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let changes = json!({
        "currentStage": payload.current_stage,
        "status": payload.status,
    });
    let application = state
        .application_service
        .update(
            id,
            payload.current_stage,
            payload.status,
            payload.expected_version,
            &claims.sub,
        )
        .await?;
    state
        .audit_service
        .record(Some(&claims.sub), "update", ENTITY, id, Some(changes))
        .await;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    post,
    path = "/applications/{id}/stage",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    request_body = MoveStagePayload,
    responses(
        (status = 200, description = "Stage changed and recorded", body = StageMoveResponse),
        (status = 400, description = "Invalid payload or unknown stage"),
        (status = 403, description = "Stage transition not allowed"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application was modified concurrently")
    )
)]
#[axum::debug_handler]
pub async fn move_stage(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<MoveStagePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let moved_by = payload.moved_by.unwrap_or_else(|| claims.sub.clone());
    let outcome = state
        .application_service
        .move_to_stage(id, &payload.to_stage, &moved_by, payload.expected_version)
        .await?;
    state
        .audit_service
        .record(
            Some(&claims.sub),
            "move_stage",
            ENTITY,
            id,
            Some(json!({
                "fromStage": outcome.history.from_stage,
                "toStage": outcome.history.to_stage,
                "movedBy": outcome.history.moved_by,
            })),
        )
        .await;
    Ok(Json(StageMoveResponse::from(outcome)))
}

#[utoipa::path(
    put,
    path = "/applications/{id}/status",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    request_body = ChangeStatusPayload,
    responses(
        (status = 200, description = "Status changed", body = ApplicationResponse),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application was modified concurrently")
    )
)]
#[axum::debug_handler]
pub async fn change_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<ChangeStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .change_status(id, &payload.status, payload.expected_version)
        .await?;
    state
        .audit_service
        .record(
            Some(&claims.sub),
            "change_status",
            ENTITY,
            id,
            Some(json!({ "status": payload.status })),
        )
        .await;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    get,
    path = "/applications/{id}/history",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Stage history, newest first", body = [StageHistoryResponse]),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_history(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse> {
    let history = state.application_service.history(id).await?;
    let items: Vec<StageHistoryResponse> = history.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/applications",
    params(
        ("searchTerm" = Option<String>, Query, description = "Matches candidate name/email, requisition title/description, current stage"),
        ("status" = Option<String>, Query, description = "Exact application status"),
        ("stage" = Option<String>, Query, description = "Exact current stage"),
        ("department" = Option<String>, Query, description = "Exact requisition department"),
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("take" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Page of applications", body = ApplicationListResponse)
    )
)]
#[axum::debug_handler]
pub async fn search_applications(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ApplicationSearchQuery>,
) -> Result<impl IntoResponse> {
    let (skip, take) = page_window(query.skip, query.take);
    let filter = ApplicationFilter::from(query);
    let page = state.application_service.search(&filter, skip, take).await?;
    Ok(Json(ApplicationListResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/applications/stage-counts",
    responses(
        (status = 200, description = "Applications per current stage", body = [StageCountResponse])
    )
)]
#[axum::debug_handler]
pub async fn stage_counts(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let counts = state.application_service.stage_counts().await?;
    let items: Vec<StageCountResponse> = counts.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    delete,
    path = "/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Application and its history deleted"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(id).await?;
    state
        .audit_service
        .record(Some(&claims.sub), "delete", ENTITY, id, None)
        .await;
    Ok(StatusCode::NO_CONTENT)
}
