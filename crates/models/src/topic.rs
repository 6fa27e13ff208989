use chrono::Utc;
use sea_orm::{entity::prelude::*, sea_query::OnConflict, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, required};
use crate::soft_delete::SoftDelete;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub topic: String,
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

/// Active topic whose name equals `name` exactly (no case folding or trimming).
pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_active()
        .filter(Column::Topic.eq(name))
        .order_by_asc(Column::Id)
        .one(db)
        .await?;
    Ok(found)
}

fn new_row(name: &str) -> Result<ActiveModel, errors::ModelError> {
    required(name, "topic")?;
    let now = Utc::now().into();
    Ok(ActiveModel {
        topic: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    })
}

/// Plain insert; fails if any row already holds `name`.
pub async fn create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, errors::ModelError> {
    new_row(name)?.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Reuse the topic with this exact name, or create it.
///
/// Inserts with `ON CONFLICT (topic) DO NOTHING` and re-reads, so a name
/// created concurrently by another writer resolves to that row. A tombstoned
/// row holding the name is revived.
pub async fn find_or_create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, errors::ModelError> {
    if let Some(existing) = find_by_name(db, name).await? {
        return Ok(existing);
    }
    Entity::insert(new_row(name)?)
        .on_conflict(OnConflict::column(Column::Topic).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;

    let row = Entity::find()
        .filter(Column::Topic.eq(name))
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::Db(format!("topic {name} missing after insert")))?;
    if row.deleted_at.is_none() {
        return Ok(row);
    }
    let mut am: ActiveModel = row.into();
    am.deleted_at = Set(None);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Every active topic in creation order.
pub async fn list_active<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find_active().order_by_asc(Column::Id).all(db).await?;
    Ok(rows)
}
