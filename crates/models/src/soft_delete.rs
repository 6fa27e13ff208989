//! Tombstone convention shared by every soft-deletable table.
//!
//! Rows are never removed; `deleted_at` is set instead. All "active" reads go
//! through [`SoftDelete::find_active`] so the `deleted_at IS NULL` filter lives
//! in one place.

use chrono::Utc;
use sea_orm::{
    entity::prelude::*, sea_query::Expr, Condition, ConnectionTrait, QueryFilter, Select,
};

pub trait SoftDelete: EntityTrait {
    fn deleted_at() -> Self::Column;
    fn updated_at() -> Self::Column;

    /// `SELECT` restricted to rows without a tombstone.
    fn find_active() -> Select<Self> {
        Self::find().filter(Self::deleted_at().is_null())
    }
}

/// Tombstone every active row matching `cond`; returns the number of rows marked.
pub async fn soft_delete_where<E, C>(db: &C, cond: Condition) -> Result<u64, DbErr>
where
    E: SoftDelete,
    C: ConnectionTrait,
{
    let now: DateTimeWithTimeZone = Utc::now().into();
    let res = E::update_many()
        .col_expr(E::deleted_at(), Expr::value(now))
        .col_expr(E::updated_at(), Expr::value(now))
        .filter(E::deleted_at().is_null())
        .filter(cond)
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
