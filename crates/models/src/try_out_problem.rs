use chrono::Utc;
use sea_orm::{entity::prelude::*, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::soft_delete::SoftDelete;
use crate::{errors, problem, try_out_packet};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "try_out_problems")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub try_out_id: i32,
    pub problem_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Packet,
    Problem,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Packet => Entity::belongs_to(try_out_packet::Entity)
                .from(Column::TryOutId)
                .to(try_out_packet::Column::Id)
                .into(),
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

pub async fn create<C: ConnectionTrait>(db: &C, try_out_id: i32, problem_id: i32) -> Result<Model, errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        try_out_id: Set(try_out_id),
        problem_id: Set(problem_id),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Whether any active packet row still points at the problem.
pub async fn is_problem_in_use<C: ConnectionTrait>(db: &C, problem_id: i32) -> Result<bool, errors::ModelError> {
    let n = Entity::find_active()
        .filter(Column::ProblemId.eq(problem_id))
        .count(db)
        .await?;
    Ok(n > 0)
}
