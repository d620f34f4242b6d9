// ==========================================
// Obra Schedule - Render Orchestrator
// ==========================================
// Coordinates the per-render pipeline in its fixed order:
//   Stage Aggregator -> Baseline Reconciler -> Buffer Simulator
// then sorts by catalog order and emits the rendering-contract rows.
// Single-threaded, synchronous, one pass per request.
// ==========================================

use crate::calendar::BusinessCalendar;
use crate::catalog::StageCatalog;
use crate::domain::types::ScheduleStatus;
use crate::domain::ScheduleEntry;
use crate::engine::aggregator::StageAggregator;
use crate::engine::reconciler::{BaselineReconciler, BaselineSelection, RenderContext};
use crate::engine::simulator::BufferSimulator;
use crate::engine::timeline::interval_contains;
use crate::engine::variance::VarianceEngine;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// RenderOptions - per-request pipeline inputs
// ==========================================
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub baseline: BaselineSelection,
    pub buffer_offset_months: i32,
    pub buffer_enabled: bool,
    pub reference_date: NaiveDate,
}

impl RenderOptions {
    pub fn live(reference_date: NaiveDate) -> Self {
        Self {
            baseline: BaselineSelection::Live,
            buffer_offset_months: 0,
            buffer_enabled: false,
            reference_date,
        }
    }
}

// ==========================================
// ScheduleRow - rendering contract output
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleRow {
    pub project: String,
    pub stage_code: String,
    pub stage_full_name: String,
    pub sector: String,
    pub group: String,
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
    pub actual_start: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
    pub percent_complete: f64,
    pub vt_days: Option<i64>,
    pub vt_text: String,
    pub vd_days: Option<i64>,
    pub vd_text: String,
    pub status: ScheduleStatus,
    /// Whether the actual interval fully contains the planned one;
    /// drives the renderer's bar stacking/overlap rule.
    pub actual_contains_planned: bool,
}

// ==========================================
// RenderOrchestrator
// ==========================================
pub struct RenderOrchestrator {
    catalog: Arc<StageCatalog>,
    variance: VarianceEngine,
}

impl RenderOrchestrator {
    pub fn new(catalog: Arc<StageCatalog>, calendar: BusinessCalendar) -> Self {
        Self {
            catalog,
            variance: VarianceEngine::new(calendar),
        }
    }

    pub fn catalog(&self) -> &Arc<StageCatalog> {
        &self.catalog
    }

    /// Run the full pipeline for one project and emit its ordered rows.
    ///
    /// The working set may span projects; aggregation and reconciliation
    /// are project-keyed, and only `project`'s rows are returned.
    pub fn render(
        &self,
        project: &str,
        mut entries: Vec<ScheduleEntry>,
        options: &RenderOptions,
    ) -> Vec<ScheduleRow> {
        info!(
            project,
            entries = entries.len(),
            live_baseline = options.baseline.is_live(),
            buffer_offset = options.buffer_offset_months,
            "render pass started"
        );

        // 1. Roll child actuals up into parents
        StageAggregator::new(&self.catalog).aggregate(&mut entries);

        // 2. Capture the live planned values for reversible switching
        let ctx = RenderContext::capture(&entries);

        // 3. Overlay the active baseline (P0 = identity)
        BaselineReconciler::new(&self.catalog).reconcile(&mut entries, &options.baseline, &ctx);

        // 4. What-if buffer on top of whichever baseline is active
        BufferSimulator::new(&self.catalog).simulate(
            &mut entries,
            options.buffer_offset_months,
            options.buffer_enabled,
        );

        // 5. Fixed total order, unknown stages last
        self.catalog.sort_entries(&mut entries);

        let rows: Vec<ScheduleRow> = entries
            .iter()
            .filter(|e| e.project == project)
            .map(|e| self.to_row(e, options.reference_date))
            .collect();

        debug!(project, rows = rows.len(), "render pass finished");
        rows
    }

    fn to_row(&self, entry: &ScheduleEntry, reference_date: NaiveDate) -> ScheduleRow {
        let class = self.catalog.classify(&entry.stage_code);
        let (code, full_name) = match self.catalog.resolve(&entry.stage_code) {
            Some(stage) => (stage.code.clone(), stage.full_name.clone()),
            None => (entry.stage_code.clone(), entry.stage_code.clone()),
        };
        let assessment = self.variance.assess(entry, reference_date);

        ScheduleRow {
            project: entry.project.clone(),
            stage_code: code,
            stage_full_name: full_name,
            sector: class.sector,
            group: class.group,
            planned_start: entry.planned_start,
            planned_end: entry.planned_end,
            actual_start: entry.actual_start,
            actual_end: entry.actual_end,
            percent_complete: entry.percent_complete,
            vt_days: assessment.vt_days,
            vt_text: assessment.vt_text,
            vd_days: assessment.vd_days,
            vd_text: assessment.vd_text,
            status: assessment.status,
            actual_contains_planned: interval_contains(
                entry.actual_start,
                entry.actual_end,
                entry.planned_start,
                entry.planned_end,
            ),
        }
    }
}
