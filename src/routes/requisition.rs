use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::{
        page_window,
        requisition_dto::{
            CreateRequisitionPayload, RequisitionListQuery, RequisitionListResponse,
            RequisitionResponse, UpdateRequisitionPayload,
        },
    },
    error::Result,
    utils::extract::{AppJson, AppPath, AppQuery},
    AppState,
};

#[utoipa::path(
    post,
    path = "/requisitions",
    request_body = CreateRequisitionPayload,
    responses(
        (status = 201, description = "Requisition created", body = RequisitionResponse),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_requisition(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRequisitionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let requisition = state.requisition_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(RequisitionResponse::from(requisition))))
}

#[utoipa::path(
    get,
    path = "/requisitions/{id}",
    params(
        ("id" = i64, Path, description = "Requisition ID")
    ),
    responses(
        (status = 200, description = "Requisition found", body = RequisitionResponse),
        (status = 404, description = "Requisition not found")
    )
)]
#[axum::debug_handler]
pub async fn get_requisition(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse> {
    let requisition = state.requisition_service.get(id).await?;
    Ok(Json(RequisitionResponse::from(requisition)))
}

#[utoipa::path(
    get,
    path = "/requisitions",
    params(
        ("searchTerm" = Option<String>, Query, description = "Matches title or description"),
        ("status" = Option<String>, Query, description = "Exact requisition status"),
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("take" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Page of requisitions", body = RequisitionListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_requisitions(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RequisitionListQuery>,
) -> Result<impl IntoResponse> {
    let (skip, take) = page_window(query.skip, query.take);
    let page = state
        .requisition_service
        .list(&query.filter(), skip, take)
        .await?;
    Ok(Json(RequisitionListResponse::from(page)))
}

#[utoipa::path(
    put,
    path = "/requisitions/{id}",
    params(
        ("id" = i64, Path, description = "Requisition ID")
    ),
    request_body = UpdateRequisitionPayload,
    responses(
        (status = 200, description = "Requisition updated", body = RequisitionResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Requisition not found")
    )
)]
#[axum::debug_handler]
pub async fn update_requisition(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateRequisitionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let requisition = state
        .requisition_service
        .update(id, payload.into())
        .await?;
    Ok(Json(RequisitionResponse::from(requisition)))
}

#[utoipa::path(
    delete,
    path = "/requisitions/{id}",
    params(
        ("id" = i64, Path, description = "Requisition ID")
    ),
    responses(
        (status = 204, description = "Requisition deleted with its applications"),
        (status = 404, description = "Requisition not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_requisition(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse> {
    state.requisition_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
