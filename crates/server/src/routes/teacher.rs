use crate::{
    dtos::teacher::{SubjectResponse, TeacherResponse},
    error::{ApiError, ApiResult},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use database::services::teacher::TeacherService;
use models::TeacherId;
use uuid::Uuid;

/// Get all active teachers, for the session form's teacher picker
#[utoipa::path(
    get,
    path = "/teachers",
    responses(
        (status = 200, description = "Active teachers", body = Vec<TeacherResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Teachers"
)]
pub async fn get_teachers(State(state): State<AppState>) -> ApiResult<Json<Vec<TeacherResponse>>> {
    let teachers = TeacherService::get_active_teachers(&state.db).await?;

    Ok(Json(teachers.into_iter().map(TeacherResponse::from).collect()))
}

/// Get the subjects a teacher is assigned to
#[utoipa::path(
    get,
    path = "/teachers/{id}/subjects",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Subjects assigned to the teacher", body = Vec<SubjectResponse>),
        (status = 404, description = "Teacher not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Teachers"
)]
pub async fn get_teacher_subjects(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<SubjectResponse>>> {
    let teacher_id = TeacherId(id);

    if TeacherService::get_teacher(&state.db, teacher_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!("Teacher {id} not found")));
    }

    let subjects = TeacherService::get_teacher_subjects(&state.db, teacher_id).await?;

    Ok(Json(subjects.into_iter().map(SubjectResponse::from).collect()))
}
