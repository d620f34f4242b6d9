// ==========================================
// Obra Schedule - Baseline Reconciler
// ==========================================
// Overlays a chosen snapshot (or live/"P0") onto the working dataset.
// Three states per stage under baseline B:
//   (a) B is the virtual P0      -> planned dates stay live
//   (b) B defines the stage      -> overwrite planned dates with B's values
//   (c) B does not define it     -> null the planned dates explicitly
// Matching runs over the catalog's bidirectional code/name index, never
// a per-entry scan.
// ==========================================

use crate::catalog::StageCatalog;
use crate::domain::{BaselineTaskSnapshot, BaselineVersion, ScheduleEntry};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// BaselineSelection - which baseline is active for a render
// ==========================================
#[derive(Debug, Clone)]
pub enum BaselineSelection {
    /// Virtual "P0": identity over the live entry set, never persisted.
    Live,
    /// A persisted snapshot.
    Version(BaselineVersion),
}

impl BaselineSelection {
    pub fn is_live(&self) -> bool {
        matches!(self, BaselineSelection::Live)
    }
}

// ==========================================
// RenderContext - per-request live snapshot
// ==========================================
// Captured once per render pass, after aggregation and before any
// reconciliation. Holding the live planned values here keeps baseline
// switching reversible and keeps per-project state from leaking across
// projects rendered in the same session.
#[derive(Debug, Clone)]
pub struct RenderContext {
    live: Vec<LiveValues>,
}

#[derive(Debug, Clone)]
struct LiveValues {
    project: String,
    planned_start: Option<NaiveDate>,
    planned_end: Option<NaiveDate>,
    percent_complete: f64,
}

impl RenderContext {
    /// Snapshot the live planned values, row by row. The entry set must
    /// stay position-stable until the render pass finishes.
    pub fn capture(entries: &[ScheduleEntry]) -> Self {
        Self {
            live: entries
                .iter()
                .map(|e| LiveValues {
                    project: e.project.clone(),
                    planned_start: e.planned_start,
                    planned_end: e.planned_end,
                    percent_complete: e.percent_complete,
                })
                .collect(),
        }
    }

    fn restore(&self, entries: &mut [ScheduleEntry], project: Option<&str>) {
        for (entry, live) in entries.iter_mut().zip(self.live.iter()) {
            if let Some(p) = project {
                if live.project != p {
                    continue;
                }
            }
            entry.planned_start = live.planned_start;
            entry.planned_end = live.planned_end;
            entry.percent_complete = live.percent_complete;
        }
    }
}

// ==========================================
// BaselineReconciler
// ==========================================
pub struct BaselineReconciler<'a> {
    catalog: &'a StageCatalog,
}

impl<'a> BaselineReconciler<'a> {
    pub fn new(catalog: &'a StageCatalog) -> Self {
        Self { catalog }
    }

    /// Apply `selection` onto the working set.
    ///
    /// Idempotent and reversible: every application first restores the
    /// affected rows to their live values from the context, then lays
    /// the baseline on top, so `reconcile(reconcile(X, B), P0) == X`
    /// for any baseline B.
    pub fn reconcile(
        &self,
        entries: &mut [ScheduleEntry],
        selection: &BaselineSelection,
        ctx: &RenderContext,
    ) {
        match selection {
            BaselineSelection::Live => {
                ctx.restore(entries, None);
            }
            BaselineSelection::Version(baseline) => {
                ctx.restore(entries, Some(baseline.project.as_str()));
                self.overlay(entries, baseline);
            }
        }
    }

    /// Overlay one snapshot onto the rows of its project. Every
    /// matching row is overwritten, not only the first, since duplicate
    /// rows for one logical stage can exist before aggregation.
    fn overlay(&self, entries: &mut [ScheduleEntry], baseline: &BaselineVersion) {
        let tasks = TaskIndex::build(self.catalog, baseline);

        for entry in entries.iter_mut() {
            if entry.project != baseline.project {
                continue;
            }
            match tasks.lookup(self.catalog, &entry.stage_code) {
                Some(task) => {
                    entry.planned_start = task.planned_start;
                    entry.planned_end = task.planned_end;
                    if let Some(percent) = task.percent_complete {
                        entry.percent_complete = percent;
                    }
                }
                None => {
                    // Intentionally empty row: the stage was not
                    // committed at baseline time.
                    entry.planned_start = None;
                    entry.planned_end = None;
                }
            }
        }
    }
}

// ==========================================
// TaskIndex - snapshot rows addressable by either naming scheme
// ==========================================
struct TaskIndex<'b> {
    by_raw: HashMap<&'b str, &'b BaselineTaskSnapshot>,
    by_code: HashMap<String, &'b BaselineTaskSnapshot>,
}

impl<'b> TaskIndex<'b> {
    fn build(catalog: &StageCatalog, baseline: &'b BaselineVersion) -> Self {
        let mut by_raw: HashMap<&str, &BaselineTaskSnapshot> = HashMap::new();
        let mut by_code: HashMap<String, &BaselineTaskSnapshot> = HashMap::new();

        for task in &baseline.tasks {
            by_raw.entry(task.stage_code.as_str()).or_insert(task);
            match catalog.resolve(&task.stage_code) {
                Some(stage) => {
                    by_code.entry(stage.code.clone()).or_insert(task);
                }
                None => {
                    // ReconciliationWarning: the snapshot references a
                    // stage no longer in the live catalog. It remains
                    // reachable by exact label, nothing fails.
                    warn!(
                        project = baseline.project.as_str(),
                        version = baseline.version_name.as_str(),
                        stage = task.stage_code.as_str(),
                        "baseline references a stage outside the live catalog"
                    );
                }
            }
        }

        Self { by_raw, by_code }
    }

    /// Strategy cascade: exact stored-field match first, then the
    /// code/name translations and normalized forms via the catalog
    /// index. Each step is an O(1) lookup.
    fn lookup(&self, catalog: &StageCatalog, label: &str) -> Option<&'b BaselineTaskSnapshot> {
        if let Some(task) = self.by_raw.get(label).copied() {
            return Some(task);
        }
        let stage = catalog.resolve(label)?;
        self.by_code.get(stage.code.as_str()).copied()
    }
}
