use chrono::Utc;
use sea_orm::{entity::prelude::*, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, required};
use crate::soft_delete::SoftDelete;

/// Declared type string of a multiple-choice problem.
pub const MULTIPLE_CHOICE: &str = "Pilihan Ganda";
/// Declared type string of a short-answer problem.
pub const SHORT_ANSWER: &str = "Isian Singkat";

/// The two problem types that drive scoring categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemKind {
    MultipleChoice,
    ShortAnswer,
}

impl ProblemKind {
    /// Exact, case-sensitive match on the declared type string. Anything else
    /// belongs to neither category.
    pub fn classify(problem_type: &str) -> Option<Self> {
        match problem_type {
            MULTIPLE_CHOICE => Some(Self::MultipleChoice),
            SHORT_ANSWER => Some(Self::ShortAnswer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => MULTIPLE_CHOICE,
            Self::ShortAnswer => SHORT_ANSWER,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "problems")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub level: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub problem_type: String,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    #[sea_orm(column_type = "Text")]
    pub first_option: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub second_option: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub third_option: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub fourth_option: Option<String>,
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

/// Writable scalar fields of a problem, shared by create and update.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProblemFields {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub problem_type: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub first_option: Option<String>,
    #[serde(default)]
    pub second_option: Option<String>,
    #[serde(default)]
    pub third_option: Option<String>,
    #[serde(default)]
    pub fourth_option: Option<String>,
}

fn is_filled(option: &Option<String>) -> bool {
    option.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl ProblemFields {
    pub fn kind(&self) -> Option<ProblemKind> {
        ProblemKind::classify(&self.problem_type)
    }

    pub fn validate(&self) -> Result<(), errors::ModelError> {
        required(&self.level, "level")?;
        required(&self.content, "content")?;
        required(&self.problem_type, "problem_type")?;
        required(&self.answer, "answer")?;
        if self.kind() == Some(ProblemKind::MultipleChoice) && !is_filled(&self.first_option) {
            return Err(errors::ModelError::Validation(
                "first_option is required for multiple choice problems".into(),
            ));
        }
        Ok(())
    }

    fn write_into(&self, am: &mut ActiveModel) {
        am.level = Set(self.level.clone());
        am.content = Set(self.content.clone());
        am.problem_type = Set(self.problem_type.clone());
        am.answer = Set(self.answer.clone());
        am.first_option = Set(self.first_option.clone());
        am.second_option = Set(self.second_option.clone());
        am.third_option = Set(self.third_option.clone());
        am.fourth_option = Set(self.fourth_option.clone());
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: &ProblemFields) -> Result<Model, errors::ModelError> {
    fields.validate()?;
    let now = Utc::now().into();
    let mut am = ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };
    fields.write_into(&mut am);
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite every scalar field of an existing problem.
pub async fn overwrite<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    fields: &ProblemFields,
) -> Result<Model, errors::ModelError> {
    fields.validate()?;
    let mut am: ActiveModel = existing.into();
    fields.write_into(&mut am);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Active problem by id.
pub async fn find_active_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_active().filter(Column::Id.eq(id)).one(db).await?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_answer() -> ProblemFields {
        ProblemFields {
            level: "Easy".into(),
            content: "2+2=?".into(),
            problem_type: SHORT_ANSWER.into(),
            answer: "4".into(),
            ..Default::default()
        }
    }

    #[test]
    fn classify_is_exact() {
        assert_eq!(ProblemKind::classify("Pilihan Ganda"), Some(ProblemKind::MultipleChoice));
        assert_eq!(ProblemKind::classify("Isian Singkat"), Some(ProblemKind::ShortAnswer));
        assert_eq!(ProblemKind::classify("pilihan ganda"), None);
        assert_eq!(ProblemKind::classify("Essay"), None);
    }

    #[test]
    fn short_answer_without_options_is_valid() {
        assert!(short_answer().validate().is_ok());
    }

    #[test]
    fn multiple_choice_requires_first_option() {
        let mut f = short_answer();
        f.problem_type = MULTIPLE_CHOICE.into();
        assert!(matches!(f.validate(), Err(errors::ModelError::Validation(_))));

        f.first_option = Some("   ".into());
        assert!(f.validate().is_err());

        f.first_option = Some("4".into());
        assert!(f.validate().is_ok());
    }

    #[test]
    fn other_types_may_leave_options_empty() {
        let mut f = short_answer();
        f.problem_type = "Essay".into();
        assert!(f.validate().is_ok());
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut f = short_answer();
        f.answer = " ".into();
        let err = f.validate().unwrap_err();
        assert_eq!(err.to_string(), "validation error: answer is required");
    }
}
