//! Create `problems` table.
//!
//! Option columns are nullable: only multiple-choice problems carry them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Problems::Table)
                    .if_not_exists()
                    .col(pk_auto(Problems::Id))
                    .col(string_len(Problems::Level, 255).not_null())
                    .col(text(Problems::Content).not_null())
                    .col(string_len(Problems::ProblemType, 255).not_null())
                    .col(text(Problems::Answer).not_null())
                    .col(text_null(Problems::FirstOption))
                    .col(text_null(Problems::SecondOption))
                    .col(text_null(Problems::ThirdOption))
                    .col(text_null(Problems::FourthOption))
                    .col(timestamp_with_time_zone(Problems::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Problems::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(Problems::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Problems::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Problems {
    Table,
    Id,
    Level,
    Content,
    ProblemType,
    Answer,
    FirstOption,
    SecondOption,
    ThirdOption,
    FourthOption,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
