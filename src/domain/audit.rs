// ==========================================
// Obra Schedule - Audit Trail Domain Model
// ==========================================
// Every baseline write (create/delete) leaves an audit record. Writes
// are best-effort: a failed audit insert degrades to a warning and never
// blocks the operation itself.
// ==========================================

use crate::domain::types::AuditActionType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// AuditRecord - one baseline write operation
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub audit_id: String,                      // uuid
    pub project: String,                       // affected project
    pub action_type: AuditActionType,          // CREATE_BASELINE / DELETE_BASELINE
    pub actor: String,                         // operator
    pub action_ts: NaiveDateTime,              // when it happened
    pub payload_json: Option<serde_json::Value>, // structured details
    pub detail: Option<String>,                // human-readable summary
}

impl AuditRecord {
    pub fn new(
        project: impl Into<String>,
        action_type: AuditActionType,
        actor: impl Into<String>,
        action_ts: NaiveDateTime,
    ) -> Self {
        Self {
            audit_id: uuid::Uuid::new_v4().to_string(),
            project: project.into(),
            action_type,
            actor: actor.into(),
            action_ts,
            payload_json: None,
            detail: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload_json = Some(payload);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
