// ==========================================
// Obra Schedule - API Layer
// ==========================================
// Scope: business API facade over the engine and repository layers
// ==========================================

pub mod baseline_api;
pub mod error;
pub mod schedule_api;

// Re-export core types
pub use baseline_api::{BaselineApi, LIVE_BASELINE_NAME};
pub use error::{ApiError, ApiResult};
pub use schedule_api::ScheduleApi;
