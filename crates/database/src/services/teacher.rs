use crate::entities::{subject_teachers, subjects, teachers};
use models::{TeacherId, TeacherStatus};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};

pub struct TeacherService;

impl TeacherService {
    /// Teachers that can be assigned new sessions, ordered by name
    pub async fn get_active_teachers(
        db: &DatabaseConnection,
    ) -> Result<Vec<teachers::Model>, DbErr> {
        teachers::Entity::find()
            .filter(teachers::Column::Status.eq(TeacherStatus::Active.as_str()))
            .order_by_asc(teachers::Column::LastName)
            .order_by_asc(teachers::Column::FirstName)
            .all(db)
            .await
    }

    pub async fn get_teacher(
        db: &DatabaseConnection,
        teacher_id: TeacherId,
    ) -> Result<Option<teachers::Model>, DbErr> {
        teachers::Entity::find_by_id(teacher_id.into_inner())
            .one(db)
            .await
    }

    /// Subjects the teacher is assigned to
    pub async fn get_teacher_subjects(
        db: &DatabaseConnection,
        teacher_id: TeacherId,
    ) -> Result<Vec<subjects::Model>, DbErr> {
        subjects::Entity::find()
            .join(JoinType::InnerJoin, subjects::Relation::SubjectTeachers.def())
            .filter(subject_teachers::Column::TeacherId.eq(teacher_id.into_inner()))
            .order_by_asc(subjects::Column::Code)
            .all(db)
            .await
    }
}
