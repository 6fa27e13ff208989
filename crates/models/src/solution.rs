use chrono::Utc;
use sea_orm::{entity::prelude::*, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, required};
use crate::problem;
use crate::soft_delete::SoftDelete;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "solutions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub problem_id: i32,
    #[sea_orm(column_type = "Text")]
    pub explanation: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Problem,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Problem => Entity::belongs_to(problem::Entity)
                .from(Column::ProblemId)
                .to(problem::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDelete for Entity {
    fn deleted_at() -> Column { Column::DeletedAt }
    fn updated_at() -> Column { Column::UpdatedAt }
}

pub async fn create<C: ConnectionTrait>(db: &C, problem_id: i32, explanation: &str) -> Result<Model, errors::ModelError> {
    required(explanation, "explanation")?;
    let now = Utc::now().into();
    let am = ActiveModel {
        problem_id: Set(problem_id),
        explanation: Set(explanation.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// The single active solution of a problem. Should more than one survive, the
/// oldest wins.
pub async fn find_active_for<C: ConnectionTrait>(db: &C, problem_id: i32) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_active()
        .filter(Column::ProblemId.eq(problem_id))
        .order_by_asc(Column::Id)
        .one(db)
        .await?;
    Ok(found)
}

/// Replace the explanation of the active solution, creating one if the problem has none.
pub async fn upsert_explanation<C: ConnectionTrait>(
    db: &C,
    problem_id: i32,
    explanation: &str,
) -> Result<Model, errors::ModelError> {
    required(explanation, "explanation")?;
    match find_active_for(db, problem_id).await? {
        Some(existing) => {
            let mut am: ActiveModel = existing.into();
            am.explanation = Set(explanation.to_string());
            am.updated_at = Set(Utc::now().into());
            am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
        }
        None => create(db, problem_id, explanation).await,
    }
}
