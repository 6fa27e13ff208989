//! Service layer for the try-out admin backend.
//! - Problem catalog, collection browsing, try-out packets and topics.
//! - Multi-row writes run in a single transaction.
//! - Admin authentication independent of the web framework.

pub mod errors;
pub mod pagination;
pub mod views;
pub mod problem_service;
pub mod collection_service;
pub mod packet_service;
pub mod topic_service;
pub mod auth;
#[cfg(test)]
pub mod test_support;
