use crate::m20251014_create_all_tables::{Sessions, SubjectTeachers};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on sessions for the per-teacher, per-day conflict lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_teacher_day")
                    .table(Sessions::Table)
                    .col(Sessions::TeacherId)
                    .col(Sessions::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        // Index on sessions for the schedule listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_day_start")
                    .table(Sessions::Table)
                    .col(Sessions::DayOfWeek)
                    .col(Sessions::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_subject_id")
                    .table(Sessions::Table)
                    .col(Sessions::SubjectId)
                    .to_owned(),
            )
            .await?;

        // A teacher is assigned to a subject at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_subject_teachers_unique")
                    .table(SubjectTeachers::Table)
                    .col(SubjectTeachers::SubjectId)
                    .col(SubjectTeachers::TeacherId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subject_teachers_teacher_id")
                    .table(SubjectTeachers::Table)
                    .col(SubjectTeachers::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_subject_teachers_teacher_id")
                    .table(SubjectTeachers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_subject_teachers_unique")
                    .table(SubjectTeachers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_sessions_subject_id")
                    .table(Sessions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_sessions_day_start")
                    .table(Sessions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_sessions_teacher_day")
                    .table(Sessions::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
