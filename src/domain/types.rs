// ==========================================
// Obra Schedule - Domain Type Enums
// ==========================================
// Scope: type-safe enums shared across engine/repository/api layers
// Serialization format: kebab-case / SCREAMING_SNAKE_CASE (matches storage)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// BufferClass - buffer ("pulmao") simulation behavior
// ==========================================
// Determined once in the stage catalog, never per-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferClass {
    /// Milestone markers (intake/delivery): never shifted.
    Unaffected,
    /// Buffer markers: only planned_start shifts.
    BufferMarker,
    /// Everything else: planned_start and planned_end shift.
    Standard,
}

impl fmt::Display for BufferClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferClass::Unaffected => write!(f, "UNAFFECTED"),
            BufferClass::BufferMarker => write!(f, "BUFFER_MARKER"),
            BufferClass::Standard => write!(f, "STANDARD"),
        }
    }
}

// ==========================================
// ScheduleStatus - per-row status classification
// ==========================================
// The engine owns this rule; rendering owns only presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleStatus {
    OnTime,
    Late,
    InProgressOverdue,
    Unclassified,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::OnTime => "on-time",
            ScheduleStatus::Late => "late",
            ScheduleStatus::InProgressOverdue => "in-progress-overdue",
            ScheduleStatus::Unclassified => "unclassified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "on-time" => ScheduleStatus::OnTime,
            "late" => ScheduleStatus::Late,
            "in-progress-overdue" => ScheduleStatus::InProgressOverdue,
            _ => ScheduleStatus::Unclassified,
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// AuditActionType - audit trail action kinds
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditActionType {
    CreateBaseline,
    DeleteBaseline,
}

impl AuditActionType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AuditActionType::CreateBaseline => "CREATE_BASELINE",
            AuditActionType::DeleteBaseline => "DELETE_BASELINE",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "CREATE_BASELINE" => Some(AuditActionType::CreateBaseline),
            "DELETE_BASELINE" => Some(AuditActionType::DeleteBaseline),
            _ => None,
        }
    }
}
