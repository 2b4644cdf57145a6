//! Error types for the HTTP layer

use crate::dtos::session::{ConflictDescription, FieldErrors, field_errors};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::{SessionError, services::session::ScheduledSession};
use log::error;
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Form input failed validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// The session overlaps sessions the teacher already has
    #[error("Session conflicts with existing sessions")]
    Conflict(Vec<ScheduledSession>),

    /// A concurrent save claimed the slot first
    #[error("Session conflicted, please retry")]
    Contended,

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Invalid(e) => Self::Validation(field_errors(&e)),
            SessionError::TeacherUnavailable(_) => Self::Validation(FieldErrors::from([(
                "teacher_id".to_string(),
                err.to_string(),
            )])),
            SessionError::SubjectUnavailable(_) => Self::Validation(FieldErrors::from([(
                "subject_id".to_string(),
                err.to_string(),
            )])),
            SessionError::NotFound(_) => Self::NotFound(err.to_string()),
            SessionError::Conflict(conflicts) => Self::Conflict(conflicts),
            SessionError::Contended => Self::Contended,
            SessionError::Database(e) => Self::Database(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let (status, body) = match self {
            Self::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": message, "fields": fields }),
            ),
            Self::Conflict(conflicts) => {
                let conflicts: Vec<ConflictDescription> =
                    conflicts.iter().map(ConflictDescription::from).collect();

                (
                    StatusCode::CONFLICT,
                    json!({
                        "error": message,
                        "has_conflict": true,
                        "retryable": false,
                        "conflicts": conflicts,
                    }),
                )
            }
            Self::Contended => (
                StatusCode::CONFLICT,
                json!({ "error": message, "retryable": true }),
            ),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            Self::Database(e) => {
                error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
