use crate::{
    days::DayOfWeek,
    schedule::{Recurrence, TimeRange},
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{AsRefStr, EnumIter, EnumProperty, EnumString, IntoEnumIterator};
use uuid::Uuid;

macro_rules! identity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                write!(f, "{}", self.0)
            }
        }
    };
}

identity!(
    /// Identity of a scheduled session
    SessionId
);
identity!(
    /// Identity of a teacher
    TeacherId
);
identity!(
    /// Identity of a subject
    SubjectId
);

/// Lifecycle status of a session
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    AsRefStr,
    EnumProperty,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SessionStatus {
    #[default]
    #[strum(props(display = "Scheduled"))]
    Scheduled,
    #[strum(props(display = "In Progress"))]
    InProgress,
    #[strum(props(display = "Completed"))]
    Completed,
    #[strum(props(display = "Cancelled"))]
    Cancelled,
    #[strum(props(display = "Rescheduled"))]
    Rescheduled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn display_name(&self) -> &'static str {
        self.get_str("display").unwrap_or_default()
    }

    /// Cancelled sessions free their slot
    pub fn occupies_slot(self) -> bool {
        self != Self::Cancelled
    }

    pub fn all() -> Vec<SessionStatus> {
        SessionStatus::iter().collect()
    }
}

/// Employment status of a teacher
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TeacherStatus {
    #[default]
    Active,
    Inactive,
    OnLeave,
}

impl TeacherStatus {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Only active teachers can be given new sessions
    pub fn is_schedulable(self) -> bool {
        self == Self::Active
    }
}

/// A single scheduled teaching occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub day: DayOfWeek,
    pub time: TimeRange,
    /// Room number or location, free text
    pub room: Option<String>,
    pub recurrence: Recurrence,
    pub status: SessionStatus,
    pub notes: Option<String>,
}

impl Session {
    /// Whether `self` and `other` would double-book the same teacher
    pub fn clashes_with(&self, other: &Session) -> bool {
        self.id != other.id
            && self.teacher_id == other.teacher_id
            && self.day == other.day
            && self.status.occupies_slot()
            && other.status.occupies_slot()
            && self.time.overlaps(&other.time)
    }
}
