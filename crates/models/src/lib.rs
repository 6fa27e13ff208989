//! Entity Store: SeaORM entities for the try-out catalog plus the validation
//! and scoring rules that belong to the rows themselves.

pub mod errors;
pub mod db;
pub mod soft_delete;
pub mod problem;
pub mod topic;
pub mod problem_topic;
pub mod solution;
pub mod try_out_packet;
pub mod try_out_problem;
pub mod admin;

pub use soft_delete::SoftDelete;

#[cfg(test)]
mod tests;
