//! Teacher double-booking detection.
//!
//! The checker is advisory: the `sessions` table carries an exclusion
//! constraint that is the final word on overlapping rows.

use crate::{
    days::DayOfWeek,
    session::{Session, SessionId},
};
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Reasons a candidate session cannot be checked or stored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    #[error("End time must be after start time ({begin} >= {end})")]
    InvalidInterval { begin: NaiveTime, end: NaiveTime },

    #[error("A teacher must be selected")]
    MissingTeacher,

    #[error("{date} is not a {day}")]
    DayMismatch { date: NaiveDate, day: DayOfWeek },
}

/// Outcome of a conflict check. Conflicts are listed in the order the
/// existing sessions were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConflictResult {
    conflicting_sessions: Vec<Session>,
}

impl ConflictResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn has_conflict(&self) -> bool {
        !self.conflicting_sessions.is_empty()
    }

    pub fn conflicting_sessions(&self) -> &[Session] {
        &self.conflicting_sessions
    }

    pub fn into_sessions(self) -> Vec<Session> {
        self.conflicting_sessions
    }
}

pub struct ConflictChecker;

impl ConflictChecker {
    /// Checks `candidate` against a teacher's `existing` sessions.
    ///
    /// `exclude_id` names the session being edited so it is not compared
    /// against itself. Sessions of other teachers, on other days, or that are
    /// cancelled never conflict. Every conflicting session is returned.
    pub fn check(
        candidate: &Session,
        existing: &[Session],
        exclude_id: Option<SessionId>,
    ) -> Result<ConflictResult, ConflictError> {
        candidate.time.validate()?;

        if !candidate.status.occupies_slot() {
            return Ok(ConflictResult::none());
        }

        let conflicting_sessions = existing
            .iter()
            .filter(|session| Some(session.id) != exclude_id)
            .filter(|session| session.teacher_id == candidate.teacher_id)
            .filter(|session| session.day == candidate.day)
            .filter(|session| session.status.occupies_slot())
            .filter(|session| candidate.time.overlaps(&session.time))
            .cloned()
            .collect();

        Ok(ConflictResult {
            conflicting_sessions,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        schedule::{Recurrence, TimeRange},
        session::{SessionStatus, SubjectId, TeacherId},
    };

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn session(teacher_id: TeacherId, day: DayOfWeek, begin: NaiveTime, end: NaiveTime) -> Session {
        Session {
            id: SessionId::new(),
            teacher_id,
            subject_id: SubjectId::new(),
            day,
            time: TimeRange { begin, end },
            room: None,
            recurrence: Recurrence::Weekly,
            status: SessionStatus::Scheduled,
            notes: None,
        }
    }

    #[test]
    fn test_worked_example() {
        let teacher = TeacherId::new();
        let existing = vec![session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 30))];

        let overlapping = session(teacher, DayOfWeek::Monday, t(10, 0), t(11, 0));
        let result = ConflictChecker::check(&overlapping, &existing, None).unwrap();
        assert!(result.has_conflict());
        assert_eq!(result.conflicting_sessions(), existing.as_slice());

        let back_to_back = session(teacher, DayOfWeek::Monday, t(10, 30), t(11, 30));
        let result = ConflictChecker::check(&back_to_back, &existing, None).unwrap();
        assert!(!result.has_conflict());
        assert!(result.conflicting_sessions().is_empty());

        let other_day = session(teacher, DayOfWeek::Tuesday, t(9, 0), t(10, 30));
        let result = ConflictChecker::check(&other_day, &existing, None).unwrap();
        assert!(!result.has_conflict());

        let other_teacher = session(TeacherId::new(), DayOfWeek::Monday, t(9, 0), t(10, 30));
        let result = ConflictChecker::check(&other_teacher, &existing, None).unwrap();
        assert!(!result.has_conflict());
    }

    #[test]
    fn test_overlap_matches_interval_formula() {
        let teacher = TeacherId::new();
        // Every pair of quarter-hour ranges between 08:00 and 11:00
        let slots: Vec<NaiveTime> = (0..=12).map(|q| t(8 + q / 4, (q % 4) * 15)).collect();

        for (i, &s1) in slots.iter().enumerate() {
            for &e1 in &slots[i + 1..] {
                for (j, &s2) in slots.iter().enumerate() {
                    for &e2 in &slots[j + 1..] {
                        let existing = vec![session(teacher, DayOfWeek::Friday, s2, e2)];
                        let candidate = session(teacher, DayOfWeek::Friday, s1, e1);
                        let result = ConflictChecker::check(&candidate, &existing, None).unwrap();

                        assert_eq!(
                            result.has_conflict(),
                            s1 < e2 && s2 < e1,
                            "[{s1}, {e1}) vs [{s2}, {e2})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_touching_intervals_do_not_conflict() {
        let teacher = TeacherId::new();
        let existing = vec![session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 0))];
        let candidate = session(teacher, DayOfWeek::Monday, t(10, 0), t(11, 0));

        let result = ConflictChecker::check(&candidate, &existing, None).unwrap();
        assert!(!result.has_conflict());

        let earlier = session(teacher, DayOfWeek::Monday, t(8, 0), t(9, 0));
        let result = ConflictChecker::check(&earlier, &existing, None).unwrap();
        assert!(!result.has_conflict());
    }

    #[test]
    fn test_identical_intervals_conflict() {
        let teacher = TeacherId::new();
        let existing = vec![session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 0))];
        let candidate = session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 0));

        let result = ConflictChecker::check(&candidate, &existing, None).unwrap();
        assert!(result.has_conflict());
        assert_eq!(result.conflicting_sessions().len(), 1);
    }

    #[test]
    fn test_different_teachers_never_conflict() {
        let existing = vec![
            session(TeacherId::new(), DayOfWeek::Monday, t(9, 0), t(12, 0)),
            session(TeacherId::new(), DayOfWeek::Monday, t(8, 0), t(17, 0)),
        ];
        let candidate = session(TeacherId::new(), DayOfWeek::Monday, t(9, 0), t(12, 0));

        let result = ConflictChecker::check(&candidate, &existing, None).unwrap();
        assert!(!result.has_conflict());
    }

    #[test]
    fn test_different_days_never_conflict() {
        let teacher = TeacherId::new();
        let existing: Vec<Session> = DayOfWeek::all()
            .into_iter()
            .filter(|day| *day != DayOfWeek::Thursday)
            .map(|day| session(teacher, day, t(8, 0), t(18, 0)))
            .collect();
        let candidate = session(teacher, DayOfWeek::Thursday, t(9, 0), t(10, 0));

        let result = ConflictChecker::check(&candidate, &existing, None).unwrap();
        assert!(!result.has_conflict());
    }

    #[test]
    fn test_edit_excludes_itself() {
        let teacher = TeacherId::new();
        let original = session(teacher, DayOfWeek::Wednesday, t(9, 0), t(10, 0));
        let existing = vec![original.clone()];

        // Extend the session by half an hour; it overlaps its old self
        let mut edited = original.clone();
        edited.time.end = t(10, 30);

        let result = ConflictChecker::check(&edited, &existing, Some(original.id)).unwrap();
        assert!(!result.has_conflict());

        let result = ConflictChecker::check(&edited, &existing, None).unwrap();
        assert!(result.has_conflict());
    }

    #[test]
    fn test_exclude_id_only_skips_that_session() {
        let teacher = TeacherId::new();
        let original = session(teacher, DayOfWeek::Wednesday, t(9, 0), t(10, 0));
        let neighbour = session(teacher, DayOfWeek::Wednesday, t(10, 0), t(11, 0));
        let existing = vec![original.clone(), neighbour.clone()];

        let mut edited = original.clone();
        edited.time.end = t(10, 15);

        let result = ConflictChecker::check(&edited, &existing, Some(original.id)).unwrap();
        assert_eq!(result.into_sessions(), vec![neighbour]);
    }

    #[test]
    fn test_zero_duration_is_invalid() {
        let teacher = TeacherId::new();
        let candidate = session(teacher, DayOfWeek::Monday, t(9, 0), t(9, 0));

        assert_eq!(
            ConflictChecker::check(&candidate, &[], None),
            Err(ConflictError::InvalidInterval {
                begin: t(9, 0),
                end: t(9, 0),
            })
        );
    }

    #[test]
    fn test_inverted_interval_is_invalid() {
        let teacher = TeacherId::new();
        let existing = vec![session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 0))];
        let candidate = session(teacher, DayOfWeek::Monday, t(11, 0), t(9, 30));

        assert!(matches!(
            ConflictChecker::check(&candidate, &existing, None),
            Err(ConflictError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_cancelled_sessions_do_not_conflict() {
        let teacher = TeacherId::new();
        let mut cancelled = session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 0));
        cancelled.status = SessionStatus::Cancelled;
        let existing = vec![cancelled];

        let candidate = session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 0));
        let result = ConflictChecker::check(&candidate, &existing, None).unwrap();
        assert!(!result.has_conflict());
    }

    #[test]
    fn test_cancelled_candidate_holds_no_slot() {
        let teacher = TeacherId::new();
        let existing = vec![session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 0))];

        let mut candidate = session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 0));
        candidate.status = SessionStatus::Cancelled;
        let result = ConflictChecker::check(&candidate, &existing, None).unwrap();
        assert!(!result.has_conflict());

        candidate.time.end = candidate.time.begin;
        assert!(ConflictChecker::check(&candidate, &existing, None).is_err());
    }

    #[test]
    fn test_other_statuses_still_conflict() {
        let teacher = TeacherId::new();
        let existing: Vec<Session> = [
            SessionStatus::InProgress,
            SessionStatus::Completed,
            SessionStatus::Rescheduled,
        ]
        .into_iter()
        .map(|status| {
            let mut s = session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 0));
            s.status = status;
            s
        })
        .collect();

        let candidate = session(teacher, DayOfWeek::Monday, t(9, 30), t(10, 30));
        let result = ConflictChecker::check(&candidate, &existing, None).unwrap();
        assert_eq!(result.conflicting_sessions().len(), 3);
    }

    #[test]
    fn test_returns_all_conflicts_in_order() {
        let teacher = TeacherId::new();
        let existing = vec![
            session(teacher, DayOfWeek::Monday, t(8, 0), t(9, 0)),
            session(teacher, DayOfWeek::Monday, t(11, 0), t(12, 0)),
            session(teacher, DayOfWeek::Monday, t(12, 0), t(13, 0)),
            session(teacher, DayOfWeek::Monday, t(9, 30), t(10, 0)),
        ];
        let candidate = session(teacher, DayOfWeek::Monday, t(8, 30), t(11, 30));

        let result = ConflictChecker::check(&candidate, &existing, None).unwrap();
        let ids: Vec<SessionId> = result.conflicting_sessions().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![existing[0].id, existing[1].id, existing[3].id]);
    }

    #[test]
    fn test_agrees_with_clashes_with() {
        let teacher = TeacherId::new();
        let a = session(teacher, DayOfWeek::Monday, t(9, 0), t(10, 0));
        let b = session(teacher, DayOfWeek::Monday, t(9, 59), t(11, 0));

        let result = ConflictChecker::check(&a, std::slice::from_ref(&b), None).unwrap();
        assert_eq!(result.has_conflict(), a.clashes_with(&b));
        assert!(!a.clashes_with(&a));
    }
}
