//! Try-out packets: timed sets of problems with per-category scoring.

use models::try_out_packet::{self, NewPacket, ProblemTally, ScoringRules};
use models::{problem, soft_delete::soft_delete_where, try_out_problem, SoftDelete};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::views::{attached_problems, enrich_problems, PacketView};

/// A problem submitted for a packet. `problem_type` decides its scoring
/// category.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PacketProblemRef {
    pub id: i32,
    #[serde(default)]
    pub problem_type: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PacketInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub is_show: Option<bool>,
    pub time_limit: Option<i32>,
    pub mc_correct_scoring: Option<i32>,
    pub mc_wrong_scoring: Option<i32>,
    pub sa_correct_scoring: Option<i32>,
    pub sa_wrong_scoring: Option<i32>,
    #[serde(default)]
    pub problems: Vec<PacketProblemRef>,
}

impl PacketInput {
    /// Check the configuration and derive the row to insert.
    pub fn to_new_packet(&self) -> Result<NewPacket, ServiceError> {
        use try_out_packet::present;
        if self.name.trim().is_empty() {
            return Err(ServiceError::Validation("name is required".into()));
        }
        if self.description.trim().is_empty() {
            return Err(ServiceError::Validation("description is required".into()));
        }
        let rules = ScoringRules {
            mc_correct: present(self.mc_correct_scoring, "mc_correct_scoring")?,
            mc_wrong: present(self.mc_wrong_scoring, "mc_wrong_scoring")?,
            sa_correct: present(self.sa_correct_scoring, "sa_correct_scoring")?,
            sa_wrong: present(self.sa_wrong_scoring, "sa_wrong_scoring")?,
        };
        let time_limit = present(self.time_limit, "time_limit")?;
        try_out_packet::validate_time_limit(time_limit)?;
        let tally = ProblemTally::tally(self.problems.iter().map(|p| p.problem_type.as_str()))?;
        Ok(NewPacket {
            name: self.name.clone(),
            description: self.description.clone(),
            is_show: self.is_show.unwrap_or(true),
            time_limit,
            rules,
            tally,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PacketUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_show: Option<bool>,
}

async fn find_packets(
    db: &DatabaseConnection,
    name: Option<&str>,
    visible_only: bool,
) -> Result<Vec<try_out_packet::Model>, ServiceError> {
    let mut select = try_out_packet::Entity::find_active();
    if let Some(n) = name.filter(|n| !n.is_empty()) {
        select = select.filter(try_out_packet::Column::Name.contains(n));
    }
    if visible_only {
        select = select.filter(try_out_packet::Column::IsShow.eq(true));
    }
    Ok(select.order_by_desc(try_out_packet::Column::Id).all(db).await?)
}

/// Active packets, newest first, optionally filtered by a name substring.
pub async fn list(db: &DatabaseConnection, name: Option<&str>) -> Result<Vec<try_out_packet::Model>, ServiceError> {
    find_packets(db, name, false).await
}

/// Like [`list`], restricted to packets flagged visible.
pub async fn list_visible(db: &DatabaseConnection, name: Option<&str>) -> Result<Vec<try_out_packet::Model>, ServiceError> {
    find_packets(db, name, true).await
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<PacketView, ServiceError> {
    let packet = try_out_packet::find_active_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("try out"))?;
    let problems = attached_problems(db, id).await?;
    Ok(PacketView { packet, problems })
}

/// Insert the packet and one link per submitted problem, in submission order.
#[instrument(skip(db, input), fields(name = %input.name, problems = input.problems.len()))]
pub async fn create(db: &DatabaseConnection, input: &PacketInput) -> Result<PacketView, ServiceError> {
    let new = input.to_new_packet()?;
    let txn = db.begin().await?;

    let mut attached = Vec::with_capacity(input.problems.len());
    for r in &input.problems {
        let p = problem::find_active_by_id(&txn, r.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("problem {} not found", r.id)))?;
        attached.push(p);
    }
    let packet = try_out_packet::create(&txn, &new).await?;
    for p in &attached {
        try_out_problem::create(&txn, packet.id, p.id).await?;
    }
    let problems = enrich_problems(&txn, attached).await?;
    txn.commit().await?;

    info!(
        try_out_id = packet.id,
        mc_total = packet.mc_total_problem,
        sa_total = packet.sa_total_problem,
        maximum_score = packet.maximum_score,
        "try_out_created"
    );
    Ok(PacketView { packet, problems })
}

/// With `is_show` present only the visibility flag changes; otherwise name and
/// description are replaced.
#[instrument(skip(db, input))]
pub async fn update(db: &DatabaseConnection, id: i32, input: &PacketUpdate) -> Result<PacketView, ServiceError> {
    let existing = try_out_packet::find_active_by_id(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("try out"))?;
    let packet = match input.is_show {
        Some(flag) => try_out_packet::set_visibility(db, existing, flag).await?,
        None => {
            let name = input.name.as_deref().unwrap_or_default();
            let description = input.description.as_deref().unwrap_or_default();
            try_out_packet::rename(db, existing, name, description).await?
        }
    };
    info!(try_out_id = id, is_show = packet.is_show, "try_out_updated");
    let problems = attached_problems(db, id).await?;
    Ok(PacketView { packet, problems })
}

/// Tombstone the packet and its problem links. The returned view lists the
/// problems as they were attached before deletion.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<PacketView, ServiceError> {
    let txn = db.begin().await?;
    let existing = try_out_packet::find_active_by_id(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("try out"))?;
    let problems = attached_problems(&txn, id).await?;

    soft_delete_where::<try_out_problem::Entity, _>(
        &txn,
        Condition::all().add(try_out_problem::Column::TryOutId.eq(id)),
    )
    .await?;
    soft_delete_where::<try_out_packet::Entity, _>(&txn, Condition::all().add(try_out_packet::Column::Id.eq(id))).await?;
    let packet = try_out_packet::Entity::find_by_id(id).one(&txn).await?.unwrap_or(existing);
    txn.commit().await?;

    info!(try_out_id = id, problems = problems.len(), "try_out_deleted");
    Ok(PacketView { packet, problems })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem_service;
    use crate::test_support::{get_db, multiple_choice, short_answer};
    use models::problem::{MULTIPLE_CHOICE, SHORT_ANSWER};

    fn packet(name: &str, problems: Vec<PacketProblemRef>) -> PacketInput {
        PacketInput {
            name: name.into(),
            description: "weekly".into(),
            is_show: None,
            time_limit: Some(120),
            mc_correct_scoring: Some(4),
            mc_wrong_scoring: Some(-1),
            sa_correct_scoring: Some(10),
            sa_wrong_scoring: Some(0),
            problems,
        }
    }

    fn r(id: i32, problem_type: &str) -> PacketProblemRef {
        PacketProblemRef { id, problem_type: problem_type.into() }
    }

    #[tokio::test]
    async fn create_counts_categories_and_maximum_score() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = problem_service::create(&db, &multiple_choice("Easy", &["Algebra"])).await?.problem.id;
        let b = problem_service::create(&db, &multiple_choice("Easy", &[])).await?.problem.id;
        let c = problem_service::create(&db, &short_answer("Hard", &[])).await?.problem.id;

        let view = create(&db, &packet("TO 1", vec![r(c, SHORT_ANSWER), r(a, MULTIPLE_CHOICE), r(b, MULTIPLE_CHOICE)])).await?;
        assert_eq!(view.packet.mc_total_problem, 2);
        assert_eq!(view.packet.sa_total_problem, 1);
        assert_eq!(view.packet.maximum_score, 18);
        assert!(view.packet.is_show);

        let fetched = get(&db, view.packet.id).await?;
        let order: Vec<i32> = fetched.problems.iter().map(|p| p.problem.id).collect();
        assert_eq!(order, vec![c, a, b]);
        assert_eq!(fetched.problems[1].topic, "Algebra");
        Ok(())
    }

    #[tokio::test]
    async fn empty_packet_scores_zero_and_unknown_types_count_nowhere() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let empty = create(&db, &packet("empty", vec![])).await?;
        assert_eq!(empty.packet.maximum_score, 0);

        let p = problem_service::create(&db, &short_answer("Easy", &[])).await?.problem.id;
        let odd = create(&db, &packet("odd", vec![r(p, "Essay")])).await?;
        assert_eq!((odd.packet.mc_total_problem, odd.packet.sa_total_problem), (0, 0));
        assert_eq!(odd.problems.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_configuration_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let mut zero_time = packet("TO", vec![]);
        zero_time.time_limit = Some(0);
        assert!(create(&db, &zero_time).await.unwrap_err().is_validation());

        let mut missing = packet("TO", vec![]);
        missing.sa_wrong_scoring = None;
        assert!(create(&db, &missing).await.unwrap_err().is_validation());

        let unknown = packet("TO", vec![r(999, SHORT_ANSWER)]);
        assert!(matches!(create(&db, &unknown).await, Err(ServiceError::NotFound(_))));
        assert!(list(&db, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_visibility_ignores_name() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let id = create(&db, &packet("TO 1", vec![])).await?.packet.id;

        let hidden = update(
            &db,
            id,
            &PacketUpdate { name: Some("renamed".into()), description: None, is_show: Some(false) },
        )
        .await?;
        assert!(!hidden.packet.is_show);
        assert_eq!(hidden.packet.name, "TO 1");

        let renamed = update(
            &db,
            id,
            &PacketUpdate { name: Some("TO 2".into()), description: Some("monthly".into()), is_show: None },
        )
        .await?;
        assert_eq!(renamed.packet.name, "TO 2");
        assert_eq!(renamed.packet.description, "monthly");

        let blank = PacketUpdate { name: Some("TO 3".into()), description: None, is_show: None };
        assert!(update(&db, id, &blank).await.unwrap_err().is_validation());
        assert!(matches!(update(&db, 999, &blank).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn listing_filters_name_and_visibility() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let first = create(&db, &packet("Try Out Math", vec![])).await?.packet.id;
        let mut hidden = packet("Try Out Physics", vec![]);
        hidden.is_show = Some(false);
        let second = create(&db, &hidden).await?.packet.id;

        let all: Vec<i32> = list(&db, None).await?.iter().map(|p| p.id).collect();
        assert_eq!(all, vec![second, first]);
        assert_eq!(list(&db, Some("Math")).await?.len(), 1);
        let visible: Vec<i32> = list_visible(&db, None).await?.iter().map(|p| p.id).collect();
        assert_eq!(visible, vec![first]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_frees_problems_and_reports_snapshot() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let p = problem_service::create(&db, &short_answer("Easy", &[])).await?.problem.id;
        let id = create(&db, &packet("TO", vec![r(p, SHORT_ANSWER)])).await?.packet.id;

        let deleted = delete(&db, id).await?;
        assert!(deleted.packet.deleted_at.is_some());
        assert_eq!(deleted.problems.len(), 1);

        assert!(matches!(get(&db, id).await, Err(ServiceError::NotFound(_))));
        assert!(list(&db, None).await?.is_empty());
        problem_service::delete(&db, p).await?;
        Ok(())
    }
}
