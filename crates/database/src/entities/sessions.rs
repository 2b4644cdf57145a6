use models::{DayOfWeek, Recurrence, Session, SessionStatus, TimeRange};
use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub subject_id: Uuid,
    pub day_of_week: i16, // ISO weekday, Monday = 1
    pub start_time: Time,
    pub end_time: Time,
    pub date: Option<Date>,
    pub is_recurring: bool,
    pub room: Option<String>,
    pub status: String, // snake_case `SessionStatus`
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Converts a stored row into the domain session.
    /// A recurring row ignores its date; a non-recurring row must carry one.
    pub fn to_session(&self) -> Result<Session, DbErr> {
        let day = DayOfWeek::from_number(self.day_of_week).ok_or_else(|| {
            DbErr::Type(format!(
                "Invalid day_of_week {} on session {}",
                self.day_of_week, self.id
            ))
        })?;

        let status = SessionStatus::from_str(&self.status).map_err(|_| {
            DbErr::Type(format!(
                "Invalid status '{}' on session {}",
                self.status, self.id
            ))
        })?;

        let recurrence = match (self.is_recurring, self.date) {
            (true, _) => Recurrence::Weekly,
            (false, Some(date)) => Recurrence::Once(date),
            (false, None) => {
                return Err(DbErr::Type(format!(
                    "One-off session {} has no date",
                    self.id
                )));
            }
        };

        Ok(Session {
            id: self.id.into(),
            teacher_id: self.teacher_id.into(),
            subject_id: self.subject_id.into(),
            day,
            time: TimeRange {
                begin: self.start_time,
                end: self.end_time,
            },
            room: self.room.clone(),
            recurrence,
            status,
            notes: self.notes.clone(),
        })
    }
}

impl ActiveModel {
    /// Builds a fully-set active model from a domain session
    pub fn from_session(session: &Session) -> Self {
        Self {
            id: Set(session.id.into_inner()),
            teacher_id: Set(session.teacher_id.into_inner()),
            subject_id: Set(session.subject_id.into_inner()),
            day_of_week: Set(session.day.number_from_monday()),
            start_time: Set(session.time.begin),
            end_time: Set(session.time.end),
            date: Set(session.recurrence.date()),
            is_recurring: Set(session.recurrence.is_recurring()),
            room: Set(session.room.clone()),
            status: Set(session.status.as_str().to_owned()),
            notes: Set(session.notes.clone()),
        }
    }
}
