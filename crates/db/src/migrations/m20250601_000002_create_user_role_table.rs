//! Create user_role table and seed the student role.

use sea_orm_migration::prelude::*;

/// Kept in sync with `entities::user_role::STUDENT_ROLE_TYPE`.
const STUDENT_ROLE_TYPE: &str = "STU";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserRole::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRole::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserRole::RoleType).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_role_role_type")
                    .table(UserRole::Table)
                    .col(UserRole::RoleType)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(UserRole::Table)
            .columns([UserRole::RoleType])
            .values_panic([STUDENT_ROLE_TYPE.into()])
            .on_conflict(OnConflict::column(UserRole::RoleType).do_nothing().to_owned())
            .to_owned();
        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRole::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserRole {
    Table,
    Id,
    RoleType,
}
