//! Create `try_out_problems` join table with FKs to `try_out_packet` and `problems`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TryOutProblems::Table)
                    .if_not_exists()
                    .col(pk_auto(TryOutProblems::Id))
                    .col(integer(TryOutProblems::TryOutId).not_null())
                    .col(integer(TryOutProblems::ProblemId).not_null())
                    .col(timestamp_with_time_zone(TryOutProblems::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(TryOutProblems::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(TryOutProblems::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_try_out_problems_packet")
                            .from(TryOutProblems::Table, TryOutProblems::TryOutId)
                            .to(TryOutPacket::Table, TryOutPacket::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_try_out_problems_problem")
                            .from(TryOutProblems::Table, TryOutProblems::ProblemId)
                            .to(Problems::Table, Problems::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TryOutProblems::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TryOutProblems { Table, Id, TryOutId, ProblemId, CreatedAt, UpdatedAt, DeletedAt }

#[derive(DeriveIden)]
enum TryOutPacket { Table, Id }

#[derive(DeriveIden)]
enum Problems { Table, Id }
