//! Create `solutions` table; one active row per problem.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Solutions::Table)
                    .if_not_exists()
                    .col(pk_auto(Solutions::Id))
                    .col(integer(Solutions::ProblemId).not_null())
                    .col(text(Solutions::Explanation).not_null())
                    .col(timestamp_with_time_zone(Solutions::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Solutions::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(Solutions::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_solutions_problem")
                            .from(Solutions::Table, Solutions::ProblemId)
                            .to(Problems::Table, Problems::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Solutions::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Solutions { Table, Id, ProblemId, Explanation, CreatedAt, UpdatedAt, DeletedAt }

#[derive(DeriveIden)]
enum Problems { Table, Id }
