mod crud_tests;

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::connect_single;

/// Fresh in-memory schema per test.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_single("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
