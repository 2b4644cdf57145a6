use chrono::{Duration, NaiveDate, NaiveTime};
use database::services::session::{ScheduledSession, SessionFilter};
use models::{
    ConflictError, DayOfWeek, Recurrence, Session, SessionId, SessionStatus, SubjectId, TeacherId,
    TimeRange,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, str::FromStr};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Validation messages keyed by the offending form field
pub type FieldErrors = BTreeMap<String, String>;

/// Maps a domain validation failure onto the form field it concerns
pub fn field_errors(err: &ConflictError) -> FieldErrors {
    let field = match err {
        ConflictError::InvalidInterval { .. } => "end_time",
        ConflictError::MissingTeacher => "teacher_id",
        ConflictError::DayMismatch { .. } => "date",
    };

    FieldErrors::from([(field.to_string(), err.to_string())])
}

fn parse_day(value: &str, errors: &mut FieldErrors) -> Option<DayOfWeek> {
    DayOfWeek::from_str(value.trim())
        .map_err(|_| {
            errors.insert(
                "day_of_week".to_string(),
                format!("'{value}' is not a day of the week."),
            );
        })
        .ok()
}

fn parse_time(field: &str, value: &str, errors: &mut FieldErrors) -> Option<NaiveTime> {
    let time = TimeRange::parse_time(value);
    if time.is_none() {
        errors.insert(field.to_string(), format!("'{value}' is not a valid time (HH:MM)."));
    }
    time
}

/// Submitted session form, used for both create and edit
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SessionForm {
    pub teacher_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    /// e.g. "monday"
    pub day_of_week: Option<String>,
    /// "HH:MM"
    pub start_time: Option<String>,
    /// "HH:MM"; may be replaced by `duration_minutes`
    pub end_time: Option<String>,
    pub duration_minutes: Option<i64>,
    /// Required for one-off sessions
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub is_recurring: bool,
    pub room: Option<String>,
    /// Defaults to "scheduled"
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl SessionForm {
    /// Validates every field and builds the session, reporting all field errors at once
    pub fn into_session(self, id: SessionId) -> Result<Session, FieldErrors> {
        let mut errors = FieldErrors::new();

        let teacher_id = self.teacher_id.map(TeacherId::from);
        if teacher_id.is_none() {
            errors.extend(field_errors(&ConflictError::MissingTeacher));
        }

        let subject_id = self.subject_id.map(SubjectId::from);
        if subject_id.is_none() {
            errors.insert("subject_id".to_string(), "A subject must be selected.".to_string());
        }

        let day = match self.day_of_week.as_deref() {
            Some(value) => parse_day(value, &mut errors),
            None => {
                errors.insert(
                    "day_of_week".to_string(),
                    "A day of the week must be selected.".to_string(),
                );
                None
            }
        };

        let begin = match self.start_time.as_deref() {
            Some(value) => parse_time("start_time", value, &mut errors),
            None => {
                errors.insert("start_time".to_string(), "A start time is required.".to_string());
                None
            }
        };

        let time = match (begin, self.end_time.as_deref(), self.duration_minutes) {
            (Some(begin), Some(end), _) => parse_time("end_time", end, &mut errors)
                .and_then(|end| {
                    TimeRange::new(begin, end)
                        .map_err(|e| errors.extend(field_errors(&e)))
                        .ok()
                }),
            (Some(begin), None, Some(minutes)) => match Duration::try_minutes(minutes) {
                Some(duration) => TimeRange::with_duration(begin, duration)
                    .map_err(|e| {
                        errors.insert("duration_minutes".to_string(), e.to_string());
                    })
                    .ok(),
                None => {
                    errors.insert(
                        "duration_minutes".to_string(),
                        format!("{minutes} minutes is not a valid duration."),
                    );
                    None
                }
            },
            (_, None, None) => {
                errors.insert(
                    "end_time".to_string(),
                    "An end time or duration is required.".to_string(),
                );
                None
            }
            (None, _, _) => None,
        };

        let recurrence = match (self.is_recurring, self.date) {
            (true, _) => Some(Recurrence::Weekly),
            (false, Some(date)) => Some(Recurrence::Once(date)),
            (false, None) => {
                errors.insert(
                    "date".to_string(),
                    "A date is required for a one-off session.".to_string(),
                );
                None
            }
        };

        if let (Some(recurrence), Some(day)) = (recurrence, day)
            && let Err(e) = recurrence.validate(day)
        {
            errors.extend(field_errors(&e));
        }

        let status = match self.status.as_deref() {
            Some(value) => SessionStatus::from_str(value.trim())
                .map_err(|_| {
                    errors.insert(
                        "status".to_string(),
                        format!("'{value}' is not a valid status."),
                    );
                })
                .ok(),
            None => Some(SessionStatus::default()),
        };

        match (teacher_id, subject_id, day, time, recurrence, status) {
            (
                Some(teacher_id),
                Some(subject_id),
                Some(day),
                Some(time),
                Some(recurrence),
                Some(status),
            ) if errors.is_empty() => {
                Ok(Session {
                    id,
                    teacher_id,
                    subject_id,
                    day,
                    time,
                    room: non_blank(self.room),
                    recurrence,
                    status,
                    notes: non_blank(self.notes),
                })
            }
            _ => Err(errors),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Query string of the pre-submit conflict probe
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConflictQueryParams {
    pub teacher_id: Option<Uuid>,
    pub day_of_week: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// The session being edited, if any
    pub exclude_id: Option<Uuid>,
}

impl ConflictQueryParams {
    /// Returns `Ok(None)` while the form is still incomplete
    pub fn into_candidate(self) -> Result<Option<(Session, Option<SessionId>)>, FieldErrors> {
        let (Some(teacher_id), Some(day), Some(begin), Some(end)) = (
            self.teacher_id,
            self.day_of_week.filter(|v| !v.trim().is_empty()),
            self.start_time.filter(|v| !v.trim().is_empty()),
            self.end_time.filter(|v| !v.trim().is_empty()),
        ) else {
            return Ok(None);
        };

        let mut errors = FieldErrors::new();
        let day = parse_day(&day, &mut errors);
        let begin = parse_time("start_time", &begin, &mut errors);
        let end = parse_time("end_time", &end, &mut errors);

        let (Some(day), Some(begin), Some(end)) = (day, begin, end) else {
            return Err(errors);
        };

        let time = TimeRange::new(begin, end).map_err(|e| field_errors(&e))?;
        let exclude_id = self.exclude_id.map(SessionId::from);

        let candidate = Session {
            id: exclude_id.unwrap_or_default(),
            teacher_id: TeacherId::from(teacher_id),
            // Subject plays no part in conflict detection
            subject_id: SubjectId(Uuid::nil()),
            day,
            time,
            room: None,
            recurrence: Recurrence::Weekly,
            status: SessionStatus::Scheduled,
            notes: None,
        };

        Ok(Some((candidate, exclude_id)))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: String,
    pub teacher_id: String,
    pub teacher_name: String,
    pub subject_id: String,
    pub subject_code: String,
    pub subject_name: String,
    pub day_of_week: String,
    pub day_display: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// e.g. "09:00 AM - 10:30 AM"
    pub formatted_time: String,
    pub date: Option<NaiveDate>,
    pub is_recurring: bool,
    pub room: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

impl From<ScheduledSession> for SessionResponse {
    fn from(scheduled: ScheduledSession) -> Self {
        let session = scheduled.session;

        Self {
            id: session.id.to_string(),
            teacher_id: session.teacher_id.to_string(),
            teacher_name: scheduled.teacher_name,
            subject_id: session.subject_id.to_string(),
            subject_code: scheduled.subject_code,
            subject_name: scheduled.subject_name,
            day_of_week: session.day.as_str().to_string(),
            day_display: session.day.display_name().to_string(),
            start_time: session.time.begin,
            end_time: session.time.end,
            formatted_time: session.time.formatted(),
            date: session.recurrence.date(),
            is_recurring: session.recurrence.is_recurring(),
            room: session.room,
            status: session.status.as_str().to_string(),
            notes: session.notes,
        }
    }
}

/// One conflicting session, in the shape the form renders it
#[derive(Debug, Serialize, ToSchema)]
pub struct ConflictDescription {
    pub session_id: String,
    pub teacher_name: String,
    pub subject: String,
    pub day: String,
    pub time_range: String,
    pub description: String,
}

impl From<&ScheduledSession> for ConflictDescription {
    fn from(scheduled: &ScheduledSession) -> Self {
        Self {
            session_id: scheduled.session.id.to_string(),
            teacher_name: scheduled.teacher_name.clone(),
            subject: scheduled.subject_name.clone(),
            day: scheduled.session.day.display_name().to_string(),
            time_range: scheduled.session.time.formatted(),
            description: scheduled.describe(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConflictResponse {
    pub has_conflict: bool,
    pub message: String,
    pub conflicts: Vec<ConflictDescription>,
}

impl ConflictResponse {
    pub fn incomplete() -> Self {
        Self {
            has_conflict: false,
            message: "Incomplete data".to_string(),
            conflicts: Vec::new(),
        }
    }

    pub fn from_conflicts(conflicts: &[ScheduledSession]) -> Self {
        let message = match conflicts {
            [] => "No conflicts found".to_string(),
            [only] => format!("Conflict with {}", only.describe()),
            many => format!("Conflicts with {} sessions", many.len()),
        };

        Self {
            has_conflict: !conflicts.is_empty(),
            message,
            conflicts: conflicts.iter().map(ConflictDescription::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedSessionsResponse {
    pub sessions: Vec<SessionResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(per_page);

        Self {
            page,
            per_page,
            total_pages,
            total_items,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub teacher_id: Option<Uuid>,
    pub day_of_week: Option<String>,
    pub subject_id: Option<Uuid>,
    pub status: Option<String>,
}

impl SessionQueryParams {
    const MAX_PER_PAGE: u64 = 100;

    /// Page and page size clamped to sane bounds
    pub fn page_bounds(&self) -> (u64, u64) {
        (self.page.max(1), self.per_page.clamp(1, Self::MAX_PER_PAGE))
    }

    /// Empty filter values mean "all"
    pub fn filter(&self) -> Result<SessionFilter, FieldErrors> {
        let mut errors = FieldErrors::new();

        let day = self
            .day_of_week
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .and_then(|v| parse_day(v, &mut errors));

        let status = self
            .status
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .and_then(|v| {
                SessionStatus::from_str(v.trim())
                    .map_err(|_| {
                        errors.insert(
                            "status".to_string(),
                            format!("'{v}' is not a valid status."),
                        );
                    })
                    .ok()
            });

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SessionFilter {
            teacher_id: self.teacher_id.map(TeacherId::from),
            day,
            subject_id: self.subject_id.map(SubjectId::from),
            status,
        })
    }
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    15
}

#[cfg(test)]
mod test {
    use super::*;

    fn complete_form() -> SessionForm {
        SessionForm {
            teacher_id: Some(Uuid::new_v4()),
            subject_id: Some(Uuid::new_v4()),
            day_of_week: Some("Monday".to_string()),
            start_time: Some("09:00".to_string()),
            end_time: Some("10:30".to_string()),
            is_recurring: true,
            room: Some("  ".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_form_builds_session() {
        let id = SessionId::new();
        let session = complete_form().into_session(id).unwrap();

        assert_eq!(session.id, id);
        assert_eq!(session.day, DayOfWeek::Monday);
        assert_eq!(session.time.to_string(), "09:00-10:30");
        assert_eq!(session.recurrence, Recurrence::Weekly);
        assert_eq!(session.status, SessionStatus::Scheduled);
        assert_eq!(session.room, None);
    }

    #[test]
    fn test_missing_teacher_is_reported() {
        let form = SessionForm {
            teacher_id: None,
            ..complete_form()
        };

        let errors = form.into_session(SessionId::new()).unwrap_err();
        assert_eq!(
            errors.get("teacher_id").map(String::as_str),
            Some("A teacher must be selected")
        );
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let form = SessionForm {
            end_time: Some("09:00".to_string()),
            ..complete_form()
        };

        let errors = form.into_session(SessionId::new()).unwrap_err();
        assert!(errors.contains_key("end_time"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_duration_replaces_end_time() {
        let form = SessionForm {
            end_time: None,
            duration_minutes: Some(45),
            ..complete_form()
        };

        let session = form.into_session(SessionId::new()).unwrap();
        assert_eq!(session.time.end, NaiveTime::from_hms_opt(9, 45, 0).unwrap());

        let form = SessionForm {
            end_time: None,
            duration_minutes: Some(0),
            ..complete_form()
        };
        let errors = form.into_session(SessionId::new()).unwrap_err();
        assert!(errors.contains_key("duration_minutes"));
    }

    #[test]
    fn test_out_of_range_duration_is_a_field_error() {
        for minutes in [i64::MAX, i64::MIN] {
            let form = SessionForm {
                end_time: None,
                duration_minutes: Some(minutes),
                ..complete_form()
            };

            let errors = form.into_session(SessionId::new()).unwrap_err();
            assert!(errors.contains_key("duration_minutes"));
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn test_one_off_session_needs_matching_date() {
        let form = SessionForm {
            is_recurring: false,
            ..complete_form()
        };
        let errors = form.into_session(SessionId::new()).unwrap_err();
        assert!(errors.contains_key("date"));

        // 2025-09-02 was a Tuesday
        let form = SessionForm {
            is_recurring: false,
            date: NaiveDate::from_ymd_opt(2025, 9, 2),
            ..complete_form()
        };
        let errors = form.into_session(SessionId::new()).unwrap_err();
        assert!(errors.contains_key("date"));

        let form = SessionForm {
            is_recurring: false,
            date: NaiveDate::from_ymd_opt(2025, 9, 1),
            ..complete_form()
        };
        let session = form.into_session(SessionId::new()).unwrap();
        assert_eq!(
            session.recurrence,
            Recurrence::Once(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
        );
    }

    #[test]
    fn test_all_field_errors_are_collected() {
        let form = SessionForm {
            day_of_week: Some("someday".to_string()),
            start_time: Some("nine".to_string()),
            status: Some("postponed".to_string()),
            subject_id: None,
            ..complete_form()
        };

        let errors = form.into_session(SessionId::new()).unwrap_err();
        for field in ["day_of_week", "start_time", "status", "subject_id"] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_probe_incomplete_data() {
        let params = ConflictQueryParams {
            teacher_id: Some(Uuid::new_v4()),
            day_of_week: Some("monday".to_string()),
            start_time: Some("09:00".to_string()),
            end_time: Some(String::new()),
            exclude_id: None,
        };

        assert!(params.into_candidate().unwrap().is_none());
    }

    #[test]
    fn test_probe_candidate_keeps_exclude_id() {
        let exclude = Uuid::new_v4();
        let params = ConflictQueryParams {
            teacher_id: Some(Uuid::new_v4()),
            day_of_week: Some("friday".to_string()),
            start_time: Some("13:00".to_string()),
            end_time: Some("14:00".to_string()),
            exclude_id: Some(exclude),
        };

        let (candidate, exclude_id) = params.into_candidate().unwrap().unwrap();
        assert_eq!(exclude_id, Some(SessionId(exclude)));
        assert_eq!(candidate.id, SessionId(exclude));
        assert_eq!(candidate.day, DayOfWeek::Friday);
    }

    #[test]
    fn test_probe_rejects_inverted_interval() {
        let params = ConflictQueryParams {
            teacher_id: Some(Uuid::new_v4()),
            day_of_week: Some("friday".to_string()),
            start_time: Some("14:00".to_string()),
            end_time: Some("13:00".to_string()),
            exclude_id: None,
        };

        let errors = params.into_candidate().unwrap_err();
        assert!(errors.contains_key("end_time"));
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(2, 15, 31);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let meta = PaginationMeta::new(1, 15, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn test_query_filter_parsing() {
        let params = SessionQueryParams {
            page: 0,
            per_page: 1000,
            teacher_id: None,
            day_of_week: Some("tuesday".to_string()),
            subject_id: None,
            status: Some(String::new()),
        };

        assert_eq!(params.page_bounds(), (1, 100));
        let filter = params.filter().unwrap();
        assert_eq!(filter.day, Some(DayOfWeek::Tuesday));
        assert_eq!(filter.status, None);

        let params = SessionQueryParams {
            status: Some("postponed".to_string()),
            ..params
        };
        assert!(params.filter().unwrap_err().contains_key("status"));
    }
}
