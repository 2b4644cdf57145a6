use models::{ConflictError, SessionId, SubjectId, TeacherId};
use sea_orm::{DbErr, RuntimeErr, sqlx};
use thiserror::Error;

use crate::services::session::ScheduledSession;

/// SQLSTATE raised by the `sessions_no_teacher_overlap` exclusion constraint
const EXCLUSION_VIOLATION: &str = "23P01";
/// SQLSTATE raised when a serializable transaction loses a race
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Invalid(#[from] ConflictError),

    #[error("Teacher {0} does not exist or is not active")]
    TeacherUnavailable(TeacherId),

    #[error("Subject {0} does not exist or is not active")]
    SubjectUnavailable(SubjectId),

    #[error("Session {0} not found")]
    NotFound(SessionId),

    #[error("Session overlaps {} existing session(s)", .0.len())]
    Conflict(Vec<ScheduledSession>),

    /// A concurrent write claimed the slot between check and commit; retrying may succeed
    #[error("Session conflicted with a concurrent change, please retry")]
    Contended,

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl SessionError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Contended)
    }
}

impl From<DbErr> for SessionError {
    fn from(err: DbErr) -> Self {
        if is_contention(&err) {
            Self::Contended
        } else {
            Self::Database(err)
        }
    }
}

fn is_contention(err: &DbErr) -> bool {
    let runtime = match err {
        DbErr::Exec(runtime) | DbErr::Query(runtime) | DbErr::Conn(runtime) => runtime,
        _ => return false,
    };

    match runtime {
        RuntimeErr::SqlxError(sqlx::Error::Database(db_err)) => {
            db_err.code().is_some_and(|code| is_contention_code(&code))
        }
        _ => false,
    }
}

fn is_contention_code(code: &str) -> bool {
    code == EXCLUSION_VIOLATION || code == SERIALIZATION_FAILURE
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_plain_db_errors_are_not_retryable() {
        let err = SessionError::from(DbErr::RecordNotFound("sessions".to_string()));
        assert!(matches!(err, SessionError::Database(_)));
        assert!(!err.is_retryable());

        let err = SessionError::from(DbErr::Exec(RuntimeErr::Internal("boom".to_string())));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_contention_codes() {
        assert!(is_contention_code("23P01"));
        assert!(is_contention_code("40001"));

        // Foreign key, unique and check violations are not races
        for code in ["23503", "23505", "23514", "40P01"] {
            assert!(!is_contention_code(code), "{code} should not be retryable");
        }
    }

    #[test]
    fn test_contended_is_retryable() {
        assert!(SessionError::Contended.is_retryable());
    }
}
