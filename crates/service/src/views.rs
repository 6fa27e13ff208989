//! Response projections: entities joined with their aggregates.

use std::collections::HashMap;

use models::{problem, problem_topic, solution, topic, try_out_packet, try_out_problem, SoftDelete};
use sea_orm::{ColumnTrait, ConnectionTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::errors::ServiceError;

/// A problem with its topic names joined by `", "` and, on single reads, its
/// solution text.
#[derive(Clone, Debug, Serialize)]
pub struct ProblemView {
    #[serde(flatten)]
    pub problem: problem::Model,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PacketView {
    #[serde(flatten)]
    pub packet: try_out_packet::Model,
    pub problems: Vec<ProblemView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicEntry {
    pub id: i32,
    pub topic: String,
}

impl From<topic::Model> for TopicEntry {
    fn from(t: topic::Model) -> Self { TopicEntry { id: t.id, topic: t.topic } }
}

/// Active topic names per problem, in join-row order. Problems without topics
/// are absent from the map.
pub async fn topic_names_for<C: ConnectionTrait>(
    db: &C,
    problem_ids: &[i32],
) -> Result<HashMap<i32, Vec<String>>, ServiceError> {
    if problem_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let links = problem_topic::Entity::find_active()
        .filter(problem_topic::Column::ProblemId.is_in(problem_ids.to_vec()))
        .order_by_asc(problem_topic::Column::Id)
        .all(db)
        .await?;
    let topic_ids: Vec<i32> = links.iter().map(|l| l.topic_id).collect();
    let names: HashMap<i32, String> = topic::Entity::find_active()
        .filter(topic::Column::Id.is_in(topic_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t.topic))
        .collect();

    let mut out: HashMap<i32, Vec<String>> = HashMap::new();
    for link in links {
        if let Some(name) = names.get(&link.topic_id) {
            out.entry(link.problem_id).or_default().push(name.clone());
        }
    }
    Ok(out)
}

/// Project a batch of problems, keeping their order.
pub async fn enrich_problems<C: ConnectionTrait>(
    db: &C,
    problems: Vec<problem::Model>,
) -> Result<Vec<ProblemView>, ServiceError> {
    let ids: Vec<i32> = problems.iter().map(|p| p.id).collect();
    let mut topics = topic_names_for(db, &ids).await?;
    Ok(problems
        .into_iter()
        .map(|p| {
            let topic = topics.remove(&p.id).map(|n| n.join(", ")).unwrap_or_default();
            ProblemView { problem: p, topic, explanation: None }
        })
        .collect())
}

/// Single problem with topics and solution text.
pub async fn problem_detail<C: ConnectionTrait>(db: &C, problem: problem::Model) -> Result<ProblemView, ServiceError> {
    let explanation = solution::find_active_for(db, problem.id).await?.map(|s| s.explanation);
    let mut views = enrich_problems(db, vec![problem]).await?;
    let mut view = views.pop().ok_or_else(|| ServiceError::not_found("problem"))?;
    view.explanation = explanation;
    Ok(view)
}

/// Active problems attached to a packet in attachment order.
pub async fn attached_problems<C: ConnectionTrait>(db: &C, try_out_id: i32) -> Result<Vec<ProblemView>, ServiceError> {
    let links = try_out_problem::Entity::find_active()
        .filter(try_out_problem::Column::TryOutId.eq(try_out_id))
        .order_by_asc(try_out_problem::Column::Id)
        .all(db)
        .await?;
    let ids: Vec<i32> = links.iter().map(|l| l.problem_id).collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let by_id: HashMap<i32, problem::Model> = problem::Entity::find_active()
        .filter(problem::Column::Id.is_in(ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let ordered: Vec<problem::Model> = ids.iter().filter_map(|id| by_id.get(id).cloned()).collect();
    enrich_problems(db, ordered).await
}
