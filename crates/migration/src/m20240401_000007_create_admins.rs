//! Create `admins` table holding admin login credentials.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(pk_auto(Admins::Id))
                    .col(string_len(Admins::Username, 128).unique_key().not_null())
                    .col(string_len(Admins::PasswordHash, 255).not_null())
                    .col(string_len(Admins::PasswordAlgorithm, 32).not_null())
                    .col(timestamp_with_time_zone(Admins::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Admins::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Admins::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Admins { Table, Id, Username, PasswordHash, PasswordAlgorithm, CreatedAt, UpdatedAt }
