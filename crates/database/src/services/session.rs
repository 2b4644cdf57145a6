use crate::{
    entities::{sessions, subjects, teachers},
    error::SessionError,
};
use log::{info, warn};
use models::{
    ConflictChecker, DayOfWeek, Session, SessionId, SessionStatus, SubjectId, TeacherId,
    TeacherStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IsolationLevel, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Serialize;
use std::{collections::HashMap, str::FromStr};
use uuid::Uuid;

/// A session together with the names needed to describe it to a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledSession {
    pub session: Session,
    pub teacher_name: String,
    pub subject_code: String,
    pub subject_name: String,
}

impl ScheduledSession {
    /// e.g. "Jane Doe teaches Algorithms on Monday, 09:00 AM - 10:30 AM"
    pub fn describe(&self) -> String {
        format!(
            "{} teaches {} on {}, {}",
            self.teacher_name,
            self.subject_name,
            self.session.day,
            self.session.time.formatted()
        )
    }
}

/// Optional filters for the schedule listing
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub teacher_id: Option<TeacherId>,
    pub day: Option<DayOfWeek>,
    pub subject_id: Option<SubjectId>,
    pub status: Option<SessionStatus>,
}

pub struct SessionService;

impl SessionService {
    /// All non-cancelled sessions of a teacher, optionally narrowed to one day.
    /// The conflict checker filters by day and status again, so both narrowings
    /// only save work.
    pub async fn find_for_teacher<C: ConnectionTrait>(
        conn: &C,
        teacher_id: TeacherId,
        day: Option<DayOfWeek>,
    ) -> Result<Vec<Session>, DbErr> {
        let mut condition = Condition::all()
            .add(sessions::Column::TeacherId.eq(teacher_id.into_inner()))
            .add(sessions::Column::Status.ne(SessionStatus::Cancelled.as_str()));

        if let Some(day) = day {
            condition = condition.add(sessions::Column::DayOfWeek.eq(day.number_from_monday()));
        }

        sessions::Entity::find()
            .filter(condition)
            .order_by_asc(sessions::Column::StartTime)
            .all(conn)
            .await?
            .iter()
            .map(sessions::Model::to_session)
            .collect()
    }

    /// Runs the conflict checker against the candidate teacher's stored
    /// sessions and describes whatever overlaps
    pub async fn check_conflicts<C: ConnectionTrait>(
        conn: &C,
        candidate: &Session,
        exclude_id: Option<SessionId>,
    ) -> Result<Vec<ScheduledSession>, SessionError> {
        candidate.time.validate()?;

        let existing =
            Self::find_for_teacher(conn, candidate.teacher_id, Some(candidate.day)).await?;
        let result = ConflictChecker::check(candidate, &existing, exclude_id)?;

        if !result.has_conflict() {
            return Ok(Vec::new());
        }

        Ok(Self::describe_sessions(conn, result.into_sessions()).await?)
    }

    /// Validates and stores a new session
    pub async fn create_session(
        db: &DatabaseConnection,
        session: Session,
    ) -> Result<ScheduledSession, SessionError> {
        session.recurrence.validate(session.day)?;

        let txn = db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;

        Self::ensure_schedulable(&txn, session.teacher_id).await?;
        Self::ensure_subject(&txn, session.subject_id).await?;

        let conflicts = Self::check_conflicts(&txn, &session, None).await?;
        if !conflicts.is_empty() {
            warn!(
                "Rejected session for teacher {} on {} {}: {} conflict(s)",
                session.teacher_id,
                session.day,
                session.time,
                conflicts.len()
            );
            return Err(SessionError::Conflict(conflicts));
        }

        sessions::ActiveModel::from_session(&session)
            .insert(&txn)
            .await?;
        txn.commit().await?;

        info!(
            "Scheduled session {} for teacher {} on {} {}",
            session.id, session.teacher_id, session.day, session.time
        );

        Self::describe_one(db, session).await
    }

    /// Validates and stores an edit of an existing session. The session is
    /// not compared against its own stored version.
    pub async fn update_session(
        db: &DatabaseConnection,
        session: Session,
    ) -> Result<ScheduledSession, SessionError> {
        session.recurrence.validate(session.day)?;

        let txn = db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;

        if sessions::Entity::find_by_id(session.id.into_inner())
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(SessionError::NotFound(session.id));
        }

        Self::ensure_schedulable(&txn, session.teacher_id).await?;
        Self::ensure_subject(&txn, session.subject_id).await?;

        let conflicts = Self::check_conflicts(&txn, &session, Some(session.id)).await?;
        if !conflicts.is_empty() {
            warn!(
                "Rejected edit of session {}: {} conflict(s)",
                session.id,
                conflicts.len()
            );
            return Err(SessionError::Conflict(conflicts));
        }

        sessions::ActiveModel::from_session(&session)
            .update(&txn)
            .await?;
        txn.commit().await?;

        info!("Updated session {}", session.id);

        Self::describe_one(db, session).await
    }

    pub async fn delete_session(
        db: &DatabaseConnection,
        id: SessionId,
    ) -> Result<(), SessionError> {
        let result = sessions::Entity::delete_by_id(id.into_inner())
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(SessionError::NotFound(id));
        }

        info!("Deleted session {id}");
        Ok(())
    }

    pub async fn get_session(
        db: &DatabaseConnection,
        id: SessionId,
    ) -> Result<Option<ScheduledSession>, DbErr> {
        let Some(row) = sessions::Entity::find_by_id(id.into_inner()).one(db).await? else {
            return Ok(None);
        };

        let mut described = Self::describe_sessions(db, vec![row.to_session()?]).await?;
        Ok(described.pop())
    }

    /// Query sessions with pagination and filtering, ordered by day then start time.
    /// A page past the last one is empty.
    pub async fn get_sessions_paginated(
        db: &DatabaseConnection,
        filter: SessionFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ScheduledSession>, u64), DbErr> {
        let mut condition = Condition::all();

        if let Some(teacher_id) = filter.teacher_id {
            condition = condition.add(sessions::Column::TeacherId.eq(teacher_id.into_inner()));
        }

        if let Some(day) = filter.day {
            condition = condition.add(sessions::Column::DayOfWeek.eq(day.number_from_monday()));
        }

        if let Some(subject_id) = filter.subject_id {
            condition = condition.add(sessions::Column::SubjectId.eq(subject_id.into_inner()));
        }

        if let Some(status) = filter.status {
            condition = condition.add(sessions::Column::Status.eq(status.as_str()));
        }

        let query = sessions::Entity::find()
            .filter(condition)
            .order_by_asc(sessions::Column::DayOfWeek)
            .order_by_asc(sessions::Column::StartTime);

        // Apply pagination
        let total_items = query.clone().count(db).await?;
        let per_page = per_page.max(1);
        if page > total_items.div_ceil(per_page).max(1) {
            return Ok((Vec::new(), total_items));
        }

        let paginator = query.paginate(db, per_page);
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?; // SeaORM uses 0-based pages

        let sessions = rows
            .iter()
            .map(sessions::Model::to_session)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((Self::describe_sessions(db, sessions).await?, total_items))
    }

    async fn ensure_schedulable<C: ConnectionTrait>(
        conn: &C,
        teacher_id: TeacherId,
    ) -> Result<(), SessionError> {
        let teacher = teachers::Entity::find_by_id(teacher_id.into_inner())
            .one(conn)
            .await?;

        let schedulable = teacher
            .and_then(|t| TeacherStatus::from_str(&t.status).ok())
            .is_some_and(TeacherStatus::is_schedulable);

        if schedulable {
            Ok(())
        } else {
            Err(SessionError::TeacherUnavailable(teacher_id))
        }
    }

    async fn ensure_subject<C: ConnectionTrait>(
        conn: &C,
        subject_id: SubjectId,
    ) -> Result<(), SessionError> {
        let subject = subjects::Entity::find_by_id(subject_id.into_inner())
            .one(conn)
            .await?;

        match subject {
            Some(subject) if subject.is_active => Ok(()),
            _ => Err(SessionError::SubjectUnavailable(subject_id)),
        }
    }

    async fn describe_one<C: ConnectionTrait>(
        conn: &C,
        session: Session,
    ) -> Result<ScheduledSession, SessionError> {
        let id = session.id;
        Self::describe_sessions(conn, vec![session])
            .await?
            .pop()
            .ok_or(SessionError::NotFound(id))
    }

    /// Attaches teacher and subject names, batch-fetching each table once
    async fn describe_sessions<C: ConnectionTrait>(
        conn: &C,
        sessions: Vec<Session>,
    ) -> Result<Vec<ScheduledSession>, DbErr> {
        if sessions.is_empty() {
            return Ok(Vec::new());
        }

        let teacher_ids: Vec<Uuid> = sessions.iter().map(|s| s.teacher_id.into_inner()).collect();
        let subject_ids: Vec<Uuid> = sessions.iter().map(|s| s.subject_id.into_inner()).collect();

        let teacher_names: HashMap<Uuid, String> = teachers::Entity::find()
            .filter(teachers::Column::Id.is_in(teacher_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|teacher| (teacher.id, teacher.full_name()))
            .collect();

        let subjects: HashMap<Uuid, subjects::Model> = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|subject| (subject.id, subject))
            .collect();

        Ok(sessions
            .into_iter()
            .map(|session| {
                let teacher_name = teacher_names
                    .get(&session.teacher_id.into_inner())
                    .cloned()
                    .unwrap_or_default();
                let (subject_code, subject_name) = subjects
                    .get(&session.subject_id.into_inner())
                    .map(|s| (s.code.clone(), s.name.clone()))
                    .unwrap_or_default();

                ScheduledSession {
                    session,
                    teacher_name,
                    subject_code,
                    subject_name,
                }
            })
            .collect())
    }
}
