// ==========================================
// Obra Schedule - API Layer Error Types
// ==========================================
// Scope: convert repository/engine errors into actionable messages
// Every error carries an explicit reason.
// ==========================================

use crate::engine::error::EngineError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API layer error type.
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== Business rule errors =====
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    ValidationError(String),

    #[error("business rule violation: {0}")]
    BusinessRuleViolation(String),

    // ===== Data access errors =====
    #[error("database error: {0}")]
    DatabaseError(String),

    // ===== Generic errors =====
    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} {}", entity, id))
            }
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(msg) => ApiError::ValidationError(msg),
            EngineError::NotFound(msg) => ApiError::NotFound(msg),
        }
    }
}

/// API layer result type alias.
pub type ApiResult<T> = Result<T, ApiError>;
