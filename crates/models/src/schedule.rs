use crate::{conflict::ConflictError, days::DayOfWeek};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Represents the half-open time range `[begin, end)` of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub begin: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// Accepted wall-clock formats, tried in order
    const FORMATS: [&'static str; 3] = ["%H:%M", "%H:%M:%S", "%I:%M %p"];

    /// Creates a new `TimeRange` if `begin` is before `end`
    pub fn new(begin: NaiveTime, end: NaiveTime) -> Result<Self, ConflictError> {
        let range = Self { begin, end };
        range.validate()?;
        Ok(range)
    }

    /// Creates a `TimeRange` from a start time and a duration.
    /// Fails if the duration is not positive or the session would run past midnight.
    pub fn with_duration(begin: NaiveTime, duration: Duration) -> Result<Self, ConflictError> {
        let (end, wrapped) = begin.overflowing_add_signed(duration);
        if wrapped != 0 || duration <= Duration::zero() {
            return Err(ConflictError::InvalidInterval { begin, end });
        }

        Self::new(begin, end)
    }

    /// Parses a single wall-clock time such as "09:30" or "09:30:00"
    pub fn parse_time(value: &str) -> Option<NaiveTime> {
        let value = value.trim();
        Self::FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
    }

    /// Parses two time strings and creates a `TimeRange`.
    /// Returns `None` if either string is not a time.
    pub fn from_strings(begin: &str, end: &str) -> Option<Result<Self, ConflictError>> {
        let begin = Self::parse_time(begin)?;
        let end = Self::parse_time(end)?;

        Some(Self::new(begin, end))
    }

    pub fn validate(&self) -> Result<(), ConflictError> {
        if self.begin < self.end {
            Ok(())
        } else {
            Err(ConflictError::InvalidInterval {
                begin: self.begin,
                end: self.end,
            })
        }
    }

    /// Half-open overlap test: touching endpoints do not overlap
    pub fn overlaps(&self, other: &Self) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.begin
    }

    /// 12-hour rendering used in user-facing messages, e.g. "09:00 AM - 10:30 AM"
    pub fn formatted(&self) -> String {
        format!(
            "{} - {}",
            self.begin.format("%I:%M %p"),
            self.end.format("%I:%M %p")
        )
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}-{}",
            self.begin.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Whether a session repeats every week or happens once on a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum Recurrence {
    #[default]
    Weekly,
    Once(NaiveDate),
}

impl Recurrence {
    pub fn is_recurring(&self) -> bool {
        matches!(self, Self::Weekly)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Weekly => None,
            Self::Once(date) => Some(*date),
        }
    }

    /// A dated session must fall on its declared day of week
    pub fn validate(&self, day: DayOfWeek) -> Result<(), ConflictError> {
        match self {
            Self::Once(date) if DayOfWeek::from(date.weekday()) != day => {
                Err(ConflictError::DayMismatch { date: *date, day })
            }
            _ => Ok(()),
        }
    }
}
