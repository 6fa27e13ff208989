//! Problem catalog: search, read and write problems together with their
//! topics and solution.

use models::{problem, problem_topic, solution, topic, try_out_problem, soft_delete::soft_delete_where, SoftDelete};
use models::problem::ProblemFields;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::pagination::{Page, PAGE_SIZE};
use crate::views::{enrich_problems, problem_detail, ProblemView};

/// Filter value meaning "no filter".
pub const ALL: &str = "all";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProblemQuery {
    pub level: Option<String>,
    pub topic: Option<String>,
    pub page: Option<i64>,
}

/// `None`, empty and the `all` sentinel disable a filter.
pub(crate) fn effective_filter(value: Option<&str>) -> Option<&str> {
    match value {
        Some(v) if !v.is_empty() && v != ALL => Some(v),
        _ => None,
    }
}

/// Create/update payload.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProblemInput {
    #[serde(flatten)]
    pub fields: ProblemFields,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

impl ProblemInput {
    /// Validate and return the topic names to attach, duplicates dropped in
    /// first-seen order.
    pub fn validate(&self) -> Result<Vec<String>, ServiceError> {
        self.fields.validate()?;
        if self.explanation.trim().is_empty() {
            return Err(ServiceError::Validation("explanation is required".into()));
        }
        let mut names: Vec<String> = Vec::with_capacity(self.topics.len());
        for name in &self.topics {
            if name.trim().is_empty() {
                return Err(ServiceError::Validation("topic names must not be empty".into()));
            }
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }
}

/// One page of active problems matching the filters, newest first.
#[instrument(skip(db))]
pub async fn search(db: &DatabaseConnection, query: &ProblemQuery) -> Result<(Vec<ProblemView>, Page), ServiceError> {
    let page = Page::from_request(query.page);
    let mut select = problem::Entity::find_active();

    if let Some(level) = effective_filter(query.level.as_deref()) {
        select = select.filter(problem::Column::Level.eq(level));
    }
    if let Some(name) = effective_filter(query.topic.as_deref()) {
        let t = topic::find_by_name(db, name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("topic {name} not found")))?;
        let ids: Vec<i32> = problem_topic::Entity::find_active()
            .filter(problem_topic::Column::TopicId.eq(t.id))
            .all(db)
            .await?
            .into_iter()
            .map(|l| l.problem_id)
            .collect();
        select = select.filter(problem::Column::Id.is_in(ids));
    }

    let total = select.clone().count(db).await?;
    page.ensure_within(total)?;
    let rows = select
        .order_by_desc(problem::Column::Id)
        .offset(page.offset())
        .limit(PAGE_SIZE)
        .all(db)
        .await?;
    Ok((enrich_problems(db, rows).await?, page))
}

pub async fn list(db: &DatabaseConnection, query: &ProblemQuery) -> Result<Vec<ProblemView>, ServiceError> {
    let (problems, _) = search(db, query).await?;
    Ok(problems)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<ProblemView, ServiceError> {
    let p = problem::find_active_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("problem"))?;
    problem_detail(db, p).await
}

async fn attach_topics<C: ConnectionTrait>(db: &C, problem_id: i32, names: &[String]) -> Result<(), ServiceError> {
    for name in names {
        let t = topic::find_or_create(db, name).await?;
        problem_topic::create(db, problem_id, t.id).await?;
    }
    Ok(())
}

/// Insert a problem, its topic links and its solution in one transaction.
#[instrument(skip(db, input), fields(level = %input.fields.level))]
pub async fn create(db: &DatabaseConnection, input: &ProblemInput) -> Result<ProblemView, ServiceError> {
    let names = input.validate()?;
    let txn = db.begin().await?;
    let p = problem::create(&txn, &input.fields).await?;
    attach_topics(&txn, p.id, &names).await?;
    let sol = solution::create(&txn, p.id, &input.explanation).await?;
    txn.commit().await?;

    info!(problem_id = p.id, topics = names.len(), "problem_created");
    Ok(ProblemView { problem: p, topic: names.join(", "), explanation: Some(sol.explanation) })
}

/// Overwrite scalar fields and solution, then replace the topic links.
#[instrument(skip(db, input))]
pub async fn update(db: &DatabaseConnection, id: i32, input: &ProblemInput) -> Result<ProblemView, ServiceError> {
    let names = input.validate()?;
    let txn = db.begin().await?;
    let existing = problem::find_active_by_id(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("problem"))?;
    let p = problem::overwrite(&txn, existing, &input.fields).await?;
    let sol = solution::upsert_explanation(&txn, id, &input.explanation).await?;
    soft_delete_where::<problem_topic::Entity, _>(
        &txn,
        Condition::all().add(problem_topic::Column::ProblemId.eq(id)),
    )
    .await?;
    attach_topics(&txn, id, &names).await?;
    txn.commit().await?;

    info!(problem_id = id, topics = names.len(), "problem_updated");
    Ok(ProblemView { problem: p, topic: names.join(", "), explanation: Some(sol.explanation) })
}

/// Tombstone a problem with its solution and topic links. Refused while any
/// active packet still uses the problem.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<ProblemView, ServiceError> {
    let txn = db.begin().await?;
    let existing = problem::find_active_by_id(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("problem"))?;
    if try_out_problem::is_problem_in_use(&txn, id).await? {
        return Err(ServiceError::Validation("problem is used by a try out packet".into()));
    }
    let mut view = problem_detail(&txn, existing).await?;

    soft_delete_where::<problem_topic::Entity, _>(&txn, Condition::all().add(problem_topic::Column::ProblemId.eq(id))).await?;
    soft_delete_where::<solution::Entity, _>(&txn, Condition::all().add(solution::Column::ProblemId.eq(id))).await?;
    soft_delete_where::<problem::Entity, _>(&txn, Condition::all().add(problem::Column::Id.eq(id))).await?;
    if let Some(tombstoned) = problem::Entity::find_by_id(id).one(&txn).await? {
        view.problem = tombstoned;
    }
    txn.commit().await?;

    info!(problem_id = id, "problem_deleted");
    Ok(view)
}
