use models::topic;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::views::TopicEntry;

/// Every active topic, oldest first.
pub async fn list_topics(db: &DatabaseConnection) -> Result<Vec<TopicEntry>, ServiceError> {
    let rows = topic::list_active(db).await?;
    Ok(rows.into_iter().map(TopicEntry::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem_service;
    use crate::test_support::{get_db, short_answer};

    #[tokio::test]
    async fn lists_each_topic_once() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        problem_service::create(&db, &short_answer("Easy", &["Algebra", "Geometry"])).await?;
        problem_service::create(&db, &short_answer("Easy", &["Geometry"])).await?;

        let names: Vec<String> = list_topics(&db).await?.into_iter().map(|t| t.topic).collect();
        assert_eq!(names, vec!["Algebra", "Geometry"]);
        Ok(())
    }
}
