// ==========================================
// Obra Schedule - Engine Layer
// ==========================================
// Scope: the baseline & reconciliation pipeline
// Rule: engines never touch SQL; persistence stays in the repository
// ==========================================

pub mod aggregator;
pub mod error;
pub mod orchestrator;
pub mod reconciler;
pub mod simulator;
pub mod snapshot;
pub mod timeline;
pub mod variance;

// Re-export core engines
pub use aggregator::StageAggregator;
pub use error::{EngineError, EngineResult};
pub use orchestrator::{RenderOptions, RenderOrchestrator, ScheduleRow};
pub use reconciler::{BaselineReconciler, BaselineSelection, RenderContext};
pub use simulator::{shift_months, BufferSimulator};
pub use snapshot::BaselineSnapshotBuilder;
pub use timeline::{interval_contains, TimelineMapper};
pub use variance::{VarianceAssessment, VarianceEngine};
