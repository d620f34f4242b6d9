// ==========================================
// Obra Schedule - Repository Layer Error Types
// ==========================================
// Tool: thiserror derive macro
// ==========================================

use thiserror::Error;

/// Repository layer error type.
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Database errors =====
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database lock acquisition failed: {0}")]
    LockError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("unique constraint violation: {0}")]
    UniqueConstraintViolation(String),

    // ===== Data quality errors =====
    #[error("snapshot decode failed: {0}")]
    SnapshotDecode(String),

    // ===== Generic errors =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    /// Whether the error means the store itself is unreachable, in
    /// which case callers degrade to the in-memory fallback rather
    /// than failing the render.
    pub fn is_store_unreachable(&self) -> bool {
        matches!(
            self,
            RepositoryError::DatabaseConnectionError(_)
                | RepositoryError::LockError(_)
                | RepositoryError::DatabaseQueryError(_)
                | RepositoryError::Other(_)
        )
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            other => RepositoryError::DatabaseQueryError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SnapshotDecode(err.to_string())
    }
}

/// Repository layer result type alias.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
