//! Create user_acc_history table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAccHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAccHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserAccHistory::EventTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(UserAccHistory::LocationId).integer().not_null())
                    .col(ColumnDef::new(UserAccHistory::EmotionId).integer().not_null())
                    .col(ColumnDef::new(UserAccHistory::UserAccId).integer().not_null())
                    .col(
                        ColumnDef::new(UserAccHistory::FrequencyIndexId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserAccHistory::Description).text().not_null())
                    .col(ColumnDef::new(UserAccHistory::BodyPartId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_acc_history_user_acc")
                            .from(UserAccHistory::Table, UserAccHistory::UserAccId)
                            .to(UserAcc::Table, UserAcc::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_acc_history_user_acc_id")
                    .table(UserAccHistory::Table)
                    .col(UserAccHistory::UserAccId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAccHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserAccHistory {
    Table,
    Id,
    EventTime,
    LocationId,
    EmotionId,
    UserAccId,
    FrequencyIndexId,
    Description,
    BodyPartId,
}

#[derive(Iden)]
enum UserAcc {
    Table,
    Id,
}
