//! Create report table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Report::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Report::StudentId).text().not_null())
                    .col(ColumnDef::new(Report::StudentName).text().not_null())
                    .col(ColumnDef::new(Report::Timestamp).timestamp_with_time_zone())
                    .col(ColumnDef::new(Report::Symbols).json_binary().not_null())
                    .col(ColumnDef::new(Report::BodyMap).json_binary())
                    .col(ColumnDef::new(Report::Emotion).json_binary().not_null())
                    .col(ColumnDef::new(Report::Location).json_binary().not_null())
                    .col(ColumnDef::new(Report::Frequency).json_binary().not_null())
                    .col(ColumnDef::new(Report::Safety).json_binary().not_null())
                    .col(
                        ColumnDef::new(Report::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Report::TeacherNotes).text())
                    .to_owned(),
            )
            .await?;

        // Index on student_id for the per-student listing
        manager
            .create_index(
                Index::create()
                    .name("idx_report_student_id")
                    .table(Report::Table)
                    .col(Report::StudentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Index on timestamp for the newest-first listing
        manager
            .create_index(
                Index::create()
                    .name("idx_report_timestamp")
                    .table(Report::Table)
                    .col(Report::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Report {
    Table,
    Id,
    StudentId,
    StudentName,
    Timestamp,
    Symbols,
    BodyMap,
    Emotion,
    Location,
    Frequency,
    Safety,
    Status,
    TeacherNotes,
}
