use anyhow::Result;
use sea_orm::{EntityTrait, PaginatorTrait};

use super::setup_test_db;
use crate::problem::{self, ProblemFields, SHORT_ANSWER};
use crate::try_out_packet::{self, NewPacket, ProblemTally, ScoringRules};
use crate::{admin, problem_topic, solution, topic, try_out_problem};

fn algebra_problem() -> ProblemFields {
    ProblemFields {
        level: "Easy".into(),
        content: "2+2=?".into(),
        problem_type: SHORT_ANSWER.into(),
        answer: "4".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_problem_create_and_overwrite() -> Result<()> {
    let db = setup_test_db().await?;

    let created = problem::create(&db, &algebra_problem()).await?;
    assert_eq!(created.level, "Easy");
    assert!(created.deleted_at.is_none());

    let mut fields = algebra_problem();
    fields.level = "Hard".into();
    let updated = problem::overwrite(&db, created.clone(), &fields).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.level, "Hard");

    let found = problem::find_active_by_id(&db, created.id).await?;
    assert_eq!(found.map(|p| p.level), Some("Hard".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_topic_find_or_create_reuses_exact_name() -> Result<()> {
    let db = setup_test_db().await?;

    let first = topic::find_or_create(&db, "Algebra").await?;
    let again = topic::find_or_create(&db, "Algebra").await?;
    let other = topic::find_or_create(&db, "algebra").await?;

    assert_eq!(first.id, again.id);
    assert_ne!(first.id, other.id);
    assert_eq!(topic::Entity::find().count(&db).await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_topic_names_are_unique_in_schema() -> Result<()> {
    let db = setup_test_db().await?;

    topic::create(&db, "Algebra").await?;
    let dup = topic::create(&db, "Algebra").await;
    assert!(matches!(dup, Err(crate::errors::ModelError::Db(_))));

    let reused = topic::find_or_create(&db, "Algebra").await?;
    assert_eq!(reused.topic, "Algebra");
    assert_eq!(topic::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_join_rows_and_solution() -> Result<()> {
    let db = setup_test_db().await?;
    let p = problem::create(&db, &algebra_problem()).await?;
    let t = topic::find_or_create(&db, "Algebra").await?;

    let link = problem_topic::create(&db, p.id, t.id).await?;
    assert_eq!((link.problem_id, link.topic_id), (p.id, t.id));

    solution::create(&db, p.id, "two plus two").await?;
    let replaced = solution::upsert_explanation(&db, p.id, "add them").await?;
    assert_eq!(replaced.explanation, "add them");
    assert_eq!(solution::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_packet_create_derives_scores() -> Result<()> {
    let db = setup_test_db().await?;
    let new = NewPacket {
        name: "Try Out 1".into(),
        description: "warm up".into(),
        is_show: true,
        time_limit: 90,
        rules: ScoringRules { mc_correct: 4, mc_wrong: -1, sa_correct: 10, sa_wrong: 0 },
        tally: ProblemTally { multiple_choice: 2, short_answer: 1 },
    };
    let packet = try_out_packet::create(&db, &new).await?;
    assert_eq!(packet.mc_total_problem, 2);
    assert_eq!(packet.sa_total_problem, 1);
    assert_eq!(packet.maximum_score, 18);

    let p = problem::create(&db, &algebra_problem()).await?;
    try_out_problem::create(&db, packet.id, p.id).await?;
    assert!(try_out_problem::is_problem_in_use(&db, p.id).await?);
    Ok(())
}

#[tokio::test]
async fn test_admin_lookup() -> Result<()> {
    let db = setup_test_db().await?;
    admin::create(&db, "root", "$argon2id$stub", "argon2id").await?;
    let found = admin::find_by_username(&db, "root").await?;
    assert!(found.is_some());
    assert!(admin::find_by_username(&db, "nobody").await?.is_none());
    Ok(())
}
