use sea_orm_migration::prelude::*;

/// Postgres guard against double-booking a teacher. Two rows for the same
/// teacher and day whose `[start_time, end_time)` ranges intersect cannot
/// coexist unless one of them is cancelled.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Needed for the equality operators on uuid and smallint inside a GiST index
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS btree_gist;")
            .await?;

        // Postgres ships no range type over `time`
        db.execute_unprepared(
            "DO $$
            BEGIN
                IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = 'timerange') THEN
                    CREATE TYPE timerange AS RANGE (subtype = time);
                END IF;
            END
            $$;",
        )
        .await?;

        db.execute_unprepared(
            "ALTER TABLE sessions
            ADD CONSTRAINT sessions_no_teacher_overlap
            EXCLUDE USING gist (
                teacher_id WITH =,
                day_of_week WITH =,
                timerange(start_time, end_time, '[)') WITH &&
            )
            WHERE (status <> 'cancelled');",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            "ALTER TABLE sessions DROP CONSTRAINT IF EXISTS sessions_no_teacher_overlap;",
        )
        .await?;

        db.execute_unprepared("DROP TYPE IF EXISTS timerange;")
            .await?;

        Ok(())
    }
}
