// ==========================================
// Obra Schedule - Engine Layer Error Types
// ==========================================
// Tool: thiserror derive macro
// ==========================================

use thiserror::Error;

/// Engine layer error type.
///
/// Reconciliation problems are deliberately absent: a baseline that
/// references a stage no longer in the live catalog is logged and
/// ignored, never fatal.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Nothing meaningful to snapshot.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Baseline or project absent on load or delete.
    #[error("not found: {0}")]
    NotFound(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
