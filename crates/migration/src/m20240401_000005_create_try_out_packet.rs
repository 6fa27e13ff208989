//! Create `try_out_packet` table.
//!
//! `maximum_score` and the per-type problem counts are derived at creation time.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TryOutPacket::Table)
                    .if_not_exists()
                    .col(pk_auto(TryOutPacket::Id))
                    .col(string_len(TryOutPacket::Name, 255).not_null())
                    .col(text(TryOutPacket::Description).not_null())
                    .col(boolean(TryOutPacket::IsShow).not_null().default(true))
                    .col(integer(TryOutPacket::TimeLimit).not_null())
                    .col(integer(TryOutPacket::MaximumScore).not_null())
                    .col(integer(TryOutPacket::McTotalProblem).not_null())
                    .col(integer(TryOutPacket::SaTotalProblem).not_null())
                    .col(integer(TryOutPacket::McCorrectScoring).not_null())
                    .col(integer(TryOutPacket::McWrongScoring).not_null())
                    .col(integer(TryOutPacket::SaCorrectScoring).not_null())
                    .col(integer(TryOutPacket::SaWrongScoring).not_null())
                    .col(timestamp_with_time_zone(TryOutPacket::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(TryOutPacket::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(TryOutPacket::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TryOutPacket::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TryOutPacket {
    Table,
    Id,
    Name,
    Description,
    IsShow,
    TimeLimit,
    MaximumScore,
    McTotalProblem,
    SaTotalProblem,
    McCorrectScoring,
    McWrongScoring,
    SaCorrectScoring,
    SaWrongScoring,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
