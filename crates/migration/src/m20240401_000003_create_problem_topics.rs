//! Create `problem_topics` join table with FKs to `problems` and `topics`.
//!
//! Join rows are soft-deleted independently of their parents.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProblemTopics::Table)
                    .if_not_exists()
                    .col(pk_auto(ProblemTopics::Id))
                    .col(integer(ProblemTopics::ProblemId).not_null())
                    .col(integer(ProblemTopics::TopicId).not_null())
                    .col(timestamp_with_time_zone(ProblemTopics::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ProblemTopics::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(ProblemTopics::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_problem_topics_problem")
                            .from(ProblemTopics::Table, ProblemTopics::ProblemId)
                            .to(Problems::Table, Problems::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_problem_topics_topic")
                            .from(ProblemTopics::Table, ProblemTopics::TopicId)
                            .to(Topics::Table, Topics::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProblemTopics::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProblemTopics { Table, Id, ProblemId, TopicId, CreatedAt, UpdatedAt, DeletedAt }

#[derive(DeriveIden)]
enum Problems { Table, Id }

#[derive(DeriveIden)]
enum Topics { Table, Id }
