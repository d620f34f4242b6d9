// ==========================================
// Obra Schedule - Project Domain Model
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Project - identity for all schedule entities
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,   // unique project name
    pub region: String, // grouping tag for filtering/reporting
}

impl Project {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
        }
    }
}
