use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub employee_id: String,
    pub specialization: Option<String>,
    pub status: String, // active, inactive, on_leave
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
    #[sea_orm(has_many = "super::subject_teachers::Entity")]
    SubjectTeachers,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::subject_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectTeachers.def()
    }
}

// Many-to-many relationship with subjects
impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        super::subject_teachers::Relation::Subject.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::subject_teachers::Relation::Teacher.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
