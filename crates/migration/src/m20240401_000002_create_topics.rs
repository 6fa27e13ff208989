//! Create `topics` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Topics::Table)
                    .if_not_exists()
                    .col(pk_auto(Topics::Id))
                    .col(string_len(Topics::Topic, 255).not_null())
                    .col(timestamp_with_time_zone(Topics::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Topics::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(Topics::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Topics::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Topics { Table, Id, Topic, CreatedAt, UpdatedAt, DeletedAt }
