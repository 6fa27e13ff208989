//! Read-only browse view over the problem catalog.

use models::topic;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::errors::ServiceError;
use crate::problem_service::{self, ProblemQuery, ALL};
use crate::views::ProblemView;

#[derive(Clone, Debug, Serialize)]
pub struct Collection {
    pub problems: Vec<ProblemView>,
    /// Names for the topic filter control.
    pub topics: Vec<String>,
    pub level: String,
    pub topic: String,
    pub page: u64,
}

/// Same filtering and paging as the catalog listing, plus the available topic
/// names and the filters that were applied.
pub async fn browse(db: &DatabaseConnection, query: &ProblemQuery) -> Result<Collection, ServiceError> {
    let (problems, page) = problem_service::search(db, query).await?;
    let topics = topic::list_active(db).await?.into_iter().map(|t| t.topic).collect();
    let echo = |v: Option<&str>| problem_service::effective_filter(v).unwrap_or(ALL).to_string();
    Ok(Collection {
        problems,
        topics,
        level: echo(query.level.as_deref()),
        topic: echo(query.topic.as_deref()),
        page: page.number(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, short_answer};

    #[tokio::test]
    async fn browse_echoes_filters_and_lists_topics() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        problem_service::create(&db, &short_answer("Easy", &["Algebra"])).await?;
        problem_service::create(&db, &short_answer("Hard", &["Geometry"])).await?;

        let all = browse(&db, &ProblemQuery::default()).await?;
        assert_eq!(all.problems.len(), 2);
        assert_eq!(all.topics, vec!["Algebra".to_string(), "Geometry".to_string()]);
        assert_eq!((all.level.as_str(), all.topic.as_str(), all.page), ("all", "all", 1));

        let q = ProblemQuery { level: Some("Hard".into()), topic: Some("Geometry".into()), page: Some(0) };
        let hard = browse(&db, &q).await?;
        assert_eq!(hard.problems.len(), 1);
        assert_eq!((hard.level.as_str(), hard.topic.as_str(), hard.page), ("Hard", "Geometry", 1));
        Ok(())
    }
}
