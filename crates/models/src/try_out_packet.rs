use chrono::Utc;
use sea_orm::{entity::prelude::*, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, required};
use crate::problem::ProblemKind;
use crate::soft_delete::SoftDelete;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "try_out_packet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub is_show: bool,
    pub time_limit: i32,
    pub maximum_score: i32,
    pub mc_total_problem: i32,
    pub sa_total_problem: i32,
    pub mc_correct_scoring: i32,
    pub mc_wrong_scoring: i32,
    pub sa_correct_scoring: i32,
    pub sa_wrong_scoring: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDelete for Entity {
    fn deleted_at() -> Column { Column::DeletedAt }
    fn updated_at() -> Column { Column::UpdatedAt }
}

/// Points awarded or deducted per answer, by problem category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoringRules {
    pub mc_correct: i32,
    pub mc_wrong: i32,
    pub sa_correct: i32,
    pub sa_wrong: i32,
}

/// Number of problems per scoring category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProblemTally {
    pub multiple_choice: i32,
    pub short_answer: i32,
}

impl ProblemTally {
    /// Count declared type strings. Unrecognized types land in neither bucket.
    pub fn tally<'a, I>(types: I) -> Result<Self, errors::ModelError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut t = ProblemTally::default();
        for ty in types {
            let slot = match ProblemKind::classify(ty) {
                Some(ProblemKind::MultipleChoice) => &mut t.multiple_choice,
                Some(ProblemKind::ShortAnswer) => &mut t.short_answer,
                None => continue,
            };
            *slot = slot
                .checked_add(1)
                .ok_or_else(|| errors::ModelError::Validation("too many problems".into()))?;
        }
        Ok(t)
    }
}

/// `mc_total * mc_correct + sa_total * sa_correct`.
pub fn maximum_score(tally: &ProblemTally, rules: &ScoringRules) -> Result<i32, errors::ModelError> {
    let overflow = || errors::ModelError::Validation("maximum_score is out of range".into());
    let mc = tally.multiple_choice.checked_mul(rules.mc_correct).ok_or_else(overflow)?;
    let sa = tally.short_answer.checked_mul(rules.sa_correct).ok_or_else(overflow)?;
    mc.checked_add(sa).ok_or_else(overflow)
}

/// Unwrap a configuration value that must be supplied.
pub fn present<T>(value: Option<T>, field: &str) -> Result<T, errors::ModelError> {
    value.ok_or_else(|| errors::ModelError::Validation(format!("{field} is required")))
}

pub fn validate_time_limit(time_limit: i32) -> Result<(), errors::ModelError> {
    if time_limit <= 0 {
        return Err(errors::ModelError::Validation("time_limit must be greater than 0".into()));
    }
    Ok(())
}

/// Everything needed to insert a packet row. Totals and maximum score are
/// derived from `tally` and `rules`.
#[derive(Clone, Debug)]
pub struct NewPacket {
    pub name: String,
    pub description: String,
    pub is_show: bool,
    pub time_limit: i32,
    pub rules: ScoringRules,
    pub tally: ProblemTally,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: &NewPacket) -> Result<Model, errors::ModelError> {
    required(&new.name, "name")?;
    required(&new.description, "description")?;
    validate_time_limit(new.time_limit)?;
    let max = maximum_score(&new.tally, &new.rules)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(new.name.clone()),
        description: Set(new.description.clone()),
        is_show: Set(new.is_show),
        time_limit: Set(new.time_limit),
        maximum_score: Set(max),
        mc_total_problem: Set(new.tally.multiple_choice),
        sa_total_problem: Set(new.tally.short_answer),
        mc_correct_scoring: Set(new.rules.mc_correct),
        mc_wrong_scoring: Set(new.rules.mc_wrong),
        sa_correct_scoring: Set(new.rules.sa_correct),
        sa_wrong_scoring: Set(new.rules.sa_wrong),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn set_visibility<C: ConnectionTrait>(db: &C, existing: Model, is_show: bool) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = existing.into();
    am.is_show = Set(is_show);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn rename<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    name: &str,
    description: &str,
) -> Result<Model, errors::ModelError> {
    required(name, "name")?;
    required(description, "description")?;
    let mut am: ActiveModel = existing.into();
    am.name = Set(name.to_string());
    am.description = Set(description.to_string());
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_active_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_active().filter(Column::Id.eq(id)).one(db).await?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{MULTIPLE_CHOICE, SHORT_ANSWER};

    #[test]
    fn tally_ignores_unknown_types() {
        let t = ProblemTally::tally([MULTIPLE_CHOICE, "Essay", SHORT_ANSWER, MULTIPLE_CHOICE, "pilihan ganda"]).unwrap();
        assert_eq!(t, ProblemTally { multiple_choice: 2, short_answer: 1 });
    }

    #[test]
    fn maximum_score_matches_formula() {
        let tally = ProblemTally { multiple_choice: 2, short_answer: 1 };
        let rules = ScoringRules { mc_correct: 4, mc_wrong: -1, sa_correct: 10, sa_wrong: 0 };
        assert_eq!(maximum_score(&tally, &rules).unwrap(), 18);
    }

    #[test]
    fn maximum_score_with_zero_counts() {
        let rules = ScoringRules { mc_correct: 4, mc_wrong: -1, sa_correct: 10, sa_wrong: 0 };
        assert_eq!(maximum_score(&ProblemTally::default(), &rules).unwrap(), 0);
        let only_sa = ProblemTally { multiple_choice: 0, short_answer: 3 };
        assert_eq!(maximum_score(&only_sa, &rules).unwrap(), 30);
    }

    #[test]
    fn maximum_score_overflow_is_a_validation_error() {
        let tally = ProblemTally { multiple_choice: i32::MAX, short_answer: 0 };
        let rules = ScoringRules { mc_correct: 2, ..Default::default() };
        assert!(matches!(maximum_score(&tally, &rules), Err(errors::ModelError::Validation(_))));
    }

    #[test]
    fn time_limit_must_be_positive() {
        assert!(validate_time_limit(0).is_err());
        assert!(validate_time_limit(-5).is_err());
        assert!(validate_time_limit(90).is_ok());
    }

    #[test]
    fn missing_config_value_names_the_field() {
        let err = present::<i32>(None, "mc_correct_scoring").unwrap_err();
        assert_eq!(err.to_string(), "validation error: mc_correct_scoring is required");
    }
}
