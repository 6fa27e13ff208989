use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Whether the caller supplied bad input, wherever the check ran.
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)))
    }

    /// Human-readable message without the category prefix.
    pub fn message(&self) -> String {
        match self {
            ServiceError::Validation(m) | ServiceError::NotFound(m) | ServiceError::Db(m) => m.clone(),
            ServiceError::Model(ModelError::Validation(m)) | ServiceError::Model(ModelError::Db(m)) => m.clone(),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ServiceError::Db(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_validation_counts_as_validation() {
        let e: ServiceError = ModelError::Validation("answer is required".into()).into();
        assert!(e.is_validation());
        assert_eq!(e.message(), "answer is required");
    }

    #[test]
    fn not_found_message_names_entity() {
        let e = ServiceError::not_found("problem");
        assert!(!e.is_validation());
        assert_eq!(e.message(), "problem not found");
    }
}
