#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_single;
use models::problem::{ProblemFields, MULTIPLE_CHOICE, SHORT_ANSWER};

use crate::problem_service::ProblemInput;

/// Fresh, migrated in-memory database for the current test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_single("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn short_answer(level: &str, topics: &[&str]) -> ProblemInput {
    ProblemInput {
        fields: ProblemFields {
            level: level.into(),
            content: "2+2=?".into(),
            problem_type: SHORT_ANSWER.into(),
            answer: "4".into(),
            ..Default::default()
        },
        topics: topics.iter().map(|t| t.to_string()).collect(),
        explanation: "two plus two".into(),
    }
}

pub fn multiple_choice(level: &str, topics: &[&str]) -> ProblemInput {
    let mut input = short_answer(level, topics);
    input.fields.problem_type = MULTIPLE_CHOICE.into();
    input.fields.first_option = Some("4".into());
    input.fields.second_option = Some("5".into());
    input
}
