//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240401_000001_create_problems;
mod m20240401_000002_create_topics;
mod m20240401_000003_create_problem_topics;
mod m20240401_000004_create_solutions;
mod m20240401_000005_create_try_out_packet;
mod m20240401_000006_create_try_out_problems;
mod m20240401_000007_create_admins;
mod m20240401_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240401_000001_create_problems::Migration),
            Box::new(m20240401_000002_create_topics::Migration),
            Box::new(m20240401_000003_create_problem_topics::Migration),
            Box::new(m20240401_000004_create_solutions::Migration),
            Box::new(m20240401_000005_create_try_out_packet::Migration),
            Box::new(m20240401_000006_create_try_out_problems::Migration),
            Box::new(m20240401_000007_create_admins::Migration),
            // Indexes should always be applied last
            Box::new(m20240401_000008_add_indexes::Migration),
        ]
    }
}
