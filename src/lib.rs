// ==========================================
// Obra Schedule - Core Library
// ==========================================
// Schedule Baseline & Reconciliation Engine for construction-project
// tracking: stage-hierarchy aggregation, baseline snapshots,
// baseline-to-live reconciliation and buffer simulation.
// Stack: Rust + SQLite
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Stage catalog - static taxonomy and normalizer
pub mod catalog;

// Business calendar - business-day arithmetic
pub mod calendar;

// Engine layer - the render pipeline
pub mod engine;

// Repository layer - data access
pub mod repository;

// Database infrastructure (connection init / unified PRAGMA)
pub mod db;

// Logging
pub mod logging;

// API layer - business facade
pub mod api;

// ==========================================
// Re-export core types
// ==========================================

// Domain types
pub use domain::types::{AuditActionType, BufferClass, ScheduleStatus};

// Domain entities
pub use domain::{
    AuditRecord, BaselineTaskSnapshot, BaselineVersion, Project, ScheduleEntry, Stage,
};

// Catalog and calendar
pub use calendar::BusinessCalendar;
pub use catalog::StageCatalog;

// Engines
pub use engine::{
    BaselineReconciler, BaselineSelection, BaselineSnapshotBuilder, BufferSimulator,
    RenderContext, RenderOptions, RenderOrchestrator, ScheduleRow, StageAggregator,
    TimelineMapper, VarianceEngine,
};

// API
pub use api::{ApiError, ApiResult, BaselineApi, ScheduleApi};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "Obra Schedule Engine";
