//! Create user_acc table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAcc::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAcc::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserAcc::UserRoleId).integer().not_null())
                    .col(ColumnDef::new(UserAcc::Name).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_acc_user_role")
                            .from(UserAcc::Table, UserAcc::UserRoleId)
                            .to(UserRole::Table, UserRole::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One account per (role, display name)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_acc_role_name")
                    .table(UserAcc::Table)
                    .col(UserAcc::UserRoleId)
                    .col(UserAcc::Name)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAcc::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserAcc {
    Table,
    Id,
    UserRoleId,
    Name,
}

#[derive(Iden)]
enum UserRole {
    Table,
    Id,
}
