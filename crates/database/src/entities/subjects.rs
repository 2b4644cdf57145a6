use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String, // e.g. "CS101"
    pub name: String,
    pub is_active: bool,
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

// Many-to-many relationship with teachers
impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        super::subject_teachers::Relation::Teacher.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::subject_teachers::Relation::Subject.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
