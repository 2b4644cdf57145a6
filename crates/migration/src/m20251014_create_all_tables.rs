use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create teachers table
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teachers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Teachers::FirstName).string().not_null())
                    .col(ColumnDef::new(Teachers::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Teachers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Teachers::EmployeeId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::Specialization).string())
                    .col(
                        ColumnDef::new(Teachers::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .to_owned(),
            )
            .await?;

        // Create subjects table
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subjects::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Subjects::Code).string().not_null())
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(
                        ColumnDef::new(Subjects::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Create subject_teachers junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(SubjectTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubjectTeachers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubjectTeachers::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(SubjectTeachers::TeacherId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subject_teachers-subject_id")
                            .from(SubjectTeachers::Table, SubjectTeachers::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subject_teachers-teacher_id")
                            .from(SubjectTeachers::Table, SubjectTeachers::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sessions table
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sessions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sessions::TeacherId).uuid().not_null())
                    .col(ColumnDef::new(Sessions::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(Sessions::DayOfWeek).small_integer().not_null())
                    .col(ColumnDef::new(Sessions::StartTime).time().not_null())
                    .col(ColumnDef::new(Sessions::EndTime).time().not_null())
                    .col(ColumnDef::new(Sessions::Date).date())
                    .col(
                        ColumnDef::new(Sessions::IsRecurring)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Sessions::Room).string())
                    .col(
                        ColumnDef::new(Sessions::Status)
                            .string()
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Sessions::Notes).text())
                    .check(Expr::col(Sessions::StartTime).lt(Expr::col(Sessions::EndTime)))
                    .check(Expr::col(Sessions::DayOfWeek).between(1, 7))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sessions-teacher_id")
                            .from(Sessions::Table, Sessions::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sessions-subject_id")
                            .from(Sessions::Table, Sessions::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to respect foreign key constraints
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SubjectTeachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Teachers {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    EmployeeId,
    Specialization,
    Status,
}

#[derive(Iden)]
pub(crate) enum Subjects {
    Table,
    Id,
    Code,
    Name,
    IsActive,
}

#[derive(Iden)]
pub(crate) enum SubjectTeachers {
    Table,
    Id,
    SubjectId,
    TeacherId,
}

#[derive(Iden)]
pub(crate) enum Sessions {
    Table,
    Id,
    TeacherId,
    SubjectId,
    DayOfWeek,
    StartTime,
    EndTime,
    Date,
    IsRecurring,
    Room,
    Status,
    Notes,
}
