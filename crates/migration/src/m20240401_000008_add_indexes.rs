use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Topics: one row per exact name, looked up on every problem write
        manager
            .create_index(
                Index::create()
                    .name("idx_topics_topic")
                    .table(Topics::Table)
                    .col(Topics::Topic)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ProblemTopics: lookups from both sides of the join
        manager
            .create_index(
                Index::create()
                    .name("idx_problem_topics_problem")
                    .table(ProblemTopics::Table)
                    .col(ProblemTopics::ProblemId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_problem_topics_topic")
                    .table(ProblemTopics::Table)
                    .col(ProblemTopics::TopicId)
                    .to_owned(),
            )
            .await?;

        // Solutions: index on problem_id
        manager
            .create_index(
                Index::create()
                    .name("idx_solutions_problem")
                    .table(Solutions::Table)
                    .col(Solutions::ProblemId)
                    .to_owned(),
            )
            .await?;

        // TryOutProblems: packet listing and the delete guard on problems
        manager
            .create_index(
                Index::create()
                    .name("idx_try_out_problems_packet")
                    .table(TryOutProblems::Table)
                    .col(TryOutProblems::TryOutId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_try_out_problems_problem")
                    .table(TryOutProblems::Table)
                    .col(TryOutProblems::ProblemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_topics_topic").table(Topics::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_problem_topics_problem").table(ProblemTopics::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_problem_topics_topic").table(ProblemTopics::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_solutions_problem").table(Solutions::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_try_out_problems_packet").table(TryOutProblems::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_try_out_problems_problem").table(TryOutProblems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Topics { Table, Topic }

#[derive(DeriveIden)]
enum ProblemTopics { Table, ProblemId, TopicId }

#[derive(DeriveIden)]
enum Solutions { Table, ProblemId }

#[derive(DeriveIden)]
enum TryOutProblems { Table, TryOutId, ProblemId }
