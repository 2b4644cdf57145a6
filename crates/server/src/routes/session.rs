use crate::{
    dtos::session::{
        ConflictQueryParams, ConflictResponse, PaginatedSessionsResponse, PaginationMeta,
        SessionForm, SessionQueryParams, SessionResponse,
    },
    error::{ApiError, ApiResult},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::session::SessionService;
use models::SessionId;
use uuid::Uuid;

/// Get paginated list of sessions
#[utoipa::path(
    get,
    path = "/sessions",
    params(SessionQueryParams),
    responses(
        (status = 200, description = "List of sessions retrieved successfully", body = PaginatedSessionsResponse),
        (status = 422, description = "Invalid filter values"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn get_sessions(
    State(state): State<AppState>,
    Query(params): Query<SessionQueryParams>,
) -> ApiResult<Json<PaginatedSessionsResponse>> {
    let filter = params.filter().map_err(ApiError::Validation)?;
    let (page, per_page) = params.page_bounds();

    let (sessions, total_items) =
        SessionService::get_sessions_paginated(&state.db, filter, page, per_page).await?;

    Ok(Json(PaginatedSessionsResponse {
        sessions: sessions.into_iter().map(SessionResponse::from).collect(),
        pagination: PaginationMeta::new(page, per_page, total_items),
    }))
}

/// Get a specific session by ID
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session found", body = SessionResponse),
        (status = 404, description = "Session not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionResponse>> {
    match SessionService::get_session(&state.db, SessionId(id)).await? {
        Some(session) => Ok(Json(session.into())),
        None => Err(ApiError::NotFound(format!("Session {id} not found"))),
    }
}

/// Schedule a new session after checking it against the teacher's timetable
#[utoipa::path(
    post,
    path = "/sessions",
    request_body = SessionForm,
    responses(
        (status = 201, description = "Session scheduled", body = SessionResponse),
        (status = 409, description = "Session overlaps an existing session, or lost a race and may be retried"),
        (status = 422, description = "Form validation failed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn create_session(
    State(state): State<AppState>,
    Json(form): Json<SessionForm>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let session = form
        .into_session(SessionId::new())
        .map_err(ApiError::Validation)?;

    let created = SessionService::create_session(&state.db, session).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Edit a session; it is re-validated against every other session of the teacher
#[utoipa::path(
    put,
    path = "/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = SessionForm,
    responses(
        (status = 200, description = "Session updated", body = SessionResponse),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session overlaps an existing session, or lost a race and may be retried"),
        (status = 422, description = "Form validation failed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<SessionForm>,
) -> ApiResult<Json<SessionResponse>> {
    let session = form
        .into_session(SessionId(id))
        .map_err(ApiError::Validation)?;

    let updated = SessionService::update_session(&state.db, session).await?;

    Ok(Json(updated.into()))
}

/// Delete a session
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Session not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    SessionService::delete_session(&state.db, SessionId(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Check a partially filled session form for conflicts before it is submitted
#[utoipa::path(
    get,
    path = "/sessions/conflicts",
    params(ConflictQueryParams),
    responses(
        (status = 200, description = "Conflict check result, or an incomplete-data notice", body = ConflictResponse),
        (status = 422, description = "Invalid day, time or interval"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sessions"
)]
pub async fn check_conflicts(
    State(state): State<AppState>,
    Query(params): Query<ConflictQueryParams>,
) -> ApiResult<Json<ConflictResponse>> {
    let Some((candidate, exclude_id)) = params.into_candidate().map_err(ApiError::Validation)?
    else {
        return Ok(Json(ConflictResponse::incomplete()));
    };

    let conflicts = SessionService::check_conflicts(&state.db, &candidate, exclude_id).await?;

    Ok(Json(ConflictResponse::from_conflicts(&conflicts)))
}
