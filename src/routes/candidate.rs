use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::{
        candidate_dto::{
            CandidateListQuery, CandidateListResponse, CandidateResponse, CreateCandidatePayload,
            UpdateCandidatePayload,
        },
        page_window,
    },
    error::Result,
    utils::extract::{AppJson, AppPath, AppQuery},
    AppState,
};

#[utoipa::path(
    post,
    path = "/candidates",
    request_body = CreateCandidatePayload,
    responses(
        (status = 201, description = "Candidate created", body = CandidateResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(CandidateResponse::from(candidate))))
}

#[utoipa::path(
    get,
    path = "/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found", body = CandidateResponse),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get(id).await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    get,
    path = "/candidates",
    params(
        ("searchTerm" = Option<String>, Query, description = "Matches first name, last name or email"),
        ("status" = Option<String>, Query, description = "Exact candidate status"),
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("take" = Option<i64>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Page of candidates", body = CandidateListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let (skip, take) = page_window(query.skip, query.take);
    let page = state
        .candidate_service
        .list(&query.filter(), skip, take)
        .await?;
    Ok(Json(CandidateListResponse::from(page)))
}

#[utoipa::path(
    put,
    path = "/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Candidate updated", body = CandidateResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.update(id, payload.into()).await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    delete,
    path = "/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 204, description = "Candidate deleted with its applications"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse> {
    state.candidate_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
