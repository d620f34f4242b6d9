// ==========================================
// Obra Schedule - Stage Domain Model
// ==========================================
// Stages are static configuration, loaded once at startup by the
// stage catalog. They are never created or mutated at runtime.
// ==========================================

use crate::domain::types::BufferClass;
use serde::{Deserialize, Serialize};

/// Sentinel code returned by the normalizer for unmapped labels.
pub const UNKNOWN_STAGE_CODE: &str = "UNKNOWN";

/// Classification value used when a stage carries no sector/group.
pub const UNSPECIFIED: &str = "unspecified";

// ==========================================
// Stage - one phase of the project lifecycle
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub code: String,                 // short canonical id (e.g. "FND")
    pub full_name: String,            // display name (e.g. "Foundations")
    pub sector: String,               // sector taxonomy
    pub group: String,                // group taxonomy
    pub order_index: usize,           // position in the fixed total order
    pub parent_code: Option<String>,  // parent stage for sub-stages
    pub buffer_class: BufferClass,    // buffer simulation behavior
}

impl Stage {
    /// A sub-stage rolls its actual dates up into a parent.
    pub fn is_sub_stage(&self) -> bool {
        self.parent_code.is_some()
    }
}

// ==========================================
// StageClass - classification lookup result
// ==========================================
// `classify` never fails: missing entries default to "unspecified"
// and sort after all known stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageClass {
    pub sector: String,
    pub group: String,
    pub order_index: Option<usize>, // None = outside the fixed order, sort last
}

impl StageClass {
    pub fn unspecified() -> Self {
        Self {
            sector: UNSPECIFIED.to_string(),
            group: UNSPECIFIED.to_string(),
            order_index: None,
        }
    }
}
