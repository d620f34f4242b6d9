// ==========================================
// Obra Schedule - Schedule Entry Domain Model
// ==========================================
// One row per (project, stage), rebuilt per render pass from ingested
// rows (already deduplicated by the caller: min start / max end / mean
// percent). Mutated in-place by Aggregator, Reconciler and Simulator,
// in that order, never by more than one component at a time.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduleEntry - working dataset row
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub project: String,                   // project name
    pub stage_code: String,                // stage label (short code or full name)
    pub planned_start: Option<NaiveDate>,  // committed start
    pub planned_end: Option<NaiveDate>,    // committed end
    pub actual_start: Option<NaiveDate>,   // observed start
    pub actual_end: Option<NaiveDate>,     // observed end
    pub percent_complete: f64,             // 0-100
}

impl ScheduleEntry {
    pub fn new(project: impl Into<String>, stage_code: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            stage_code: stage_code.into(),
            planned_start: None,
            planned_end: None,
            actual_start: None,
            actual_end: None,
            percent_complete: 0.0,
        }
    }

    /// Whether the entry carries any actual data (own or aggregated).
    ///
    /// Drives the baseline inclusion rule and the aggregation trigger:
    /// a recorded date or nonzero progress counts, planned dates do not.
    pub fn has_actual_data(&self) -> bool {
        self.actual_start.is_some() || self.actual_end.is_some() || self.percent_complete > 0.0
    }
}
