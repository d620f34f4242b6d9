// ==========================================
// Obra Schedule - Schedule API
// ==========================================
// Scope: the per-render entry point. Receives pre-deduplicated rows
// from ingestion, applies the pipeline, returns the finalized ordered
// rows of the rendering contract.
// ==========================================

use crate::api::baseline_api::BaselineApi;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Project, ScheduleEntry};
use crate::engine::{RenderOptions, RenderOrchestrator, ScheduleRow};
use chrono::NaiveDate;
use std::sync::Arc;

/// Largest accepted buffer offset, either direction, in months.
const MAX_BUFFER_OFFSET_MONTHS: i32 = 24;

// ==========================================
// ScheduleApi
// ==========================================
pub struct ScheduleApi {
    orchestrator: RenderOrchestrator,
    baselines: Arc<BaselineApi>,
}

impl ScheduleApi {
    pub fn new(orchestrator: RenderOrchestrator, baselines: Arc<BaselineApi>) -> Self {
        Self {
            orchestrator,
            baselines,
        }
    }

    pub fn baselines(&self) -> &Arc<BaselineApi> {
        &self.baselines
    }

    /// Render one project's schedule.
    ///
    /// # Arguments
    /// - `baseline_name`: None or "P0" renders against live; a named
    ///   baseline that cannot be loaded degrades to live with a warning
    /// - `buffer_offset_months` / `buffer_enabled`: what-if buffer on
    ///   top of whichever baseline is active
    /// - `reference_date`: date the status classification runs against
    ///
    /// # Returns
    /// - Ok(rows): ordered rows with resolved dates, VT/VD and status
    pub fn render_schedule(
        &self,
        project: &Project,
        entries: Vec<ScheduleEntry>,
        baseline_name: Option<&str>,
        buffer_offset_months: i32,
        buffer_enabled: bool,
        reference_date: NaiveDate,
    ) -> ApiResult<Vec<ScheduleRow>> {
        if project.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("project name must not be empty".to_string()));
        }
        if buffer_offset_months.abs() > MAX_BUFFER_OFFSET_MONTHS {
            return Err(ApiError::InvalidInput(format!(
                "buffer offset must be within -{0}..={0} months",
                MAX_BUFFER_OFFSET_MONTHS
            )));
        }

        let baseline = self.baselines.selection_or_live(&project.name, baseline_name);

        let options = RenderOptions {
            baseline,
            buffer_offset_months,
            buffer_enabled,
            reference_date,
        };

        Ok(self.orchestrator.render(&project.name, entries, &options))
    }
}
