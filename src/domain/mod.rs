// ==========================================
// Obra Schedule - Domain Model Layer
// ==========================================
// Scope: domain entities and shared type enums
// Rule: no data access logic, no engine logic
// ==========================================

pub mod audit;
pub mod baseline;
pub mod project;
pub mod schedule;
pub mod stage;
pub mod types;

// Re-export core types
pub use audit::AuditRecord;
pub use baseline::{
    format_version_name, next_version_number, parse_version_number, BaselineTaskSnapshot,
    BaselineVersion,
};
pub use project::Project;
pub use schedule::ScheduleEntry;
pub use stage::{Stage, StageClass, UNKNOWN_STAGE_CODE, UNSPECIFIED};
pub use types::{AuditActionType, BufferClass, ScheduleStatus};
