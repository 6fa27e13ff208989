//! Admin authentication: domain, repository and service layers.
//!
//! Accounts live in the `admins` table; a successful login yields an HS256
//! token carrying the `is_admin` claim checked by the HTTP guard.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;
pub mod token;

pub use service::AuthService;
