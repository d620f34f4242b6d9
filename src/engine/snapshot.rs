// ==========================================
// Obra Schedule - Baseline Snapshot Builder
// ==========================================
// Freezes the current state into a named, versioned snapshot: what
// really happened becomes the new plan. Must run on aggregated entries
// so parent stages freeze their derived actuals.
// ==========================================

use crate::catalog::StageCatalog;
use crate::domain::{
    format_version_name, next_version_number, BaselineTaskSnapshot, BaselineVersion, Project,
    ScheduleEntry,
};
use crate::engine::error::{EngineError, EngineResult};
use chrono::NaiveDateTime;
use std::collections::HashSet;
use tracing::{debug, info};

// ==========================================
// BaselineSnapshotBuilder
// ==========================================
pub struct BaselineSnapshotBuilder<'a> {
    catalog: &'a StageCatalog,
}

impl<'a> BaselineSnapshotBuilder<'a> {
    pub fn new(catalog: &'a StageCatalog) -> Self {
        Self { catalog }
    }

    /// Build a baseline snapshot of `project` from the working set.
    ///
    /// Per entry, the snapshot's planned dates are populated from the
    /// entry's actual dates first; where an actual date is absent the
    /// current planned date is the fallback. Entries with no actual
    /// data at all are dropped entirely, never stored empty.
    ///
    /// # Arguments
    /// - `entries`: aggregated working set (may span projects)
    /// - `existing_versions`: version names already persisted for the
    ///   project, used to pick the next `P{n}` number
    ///
    /// # Errors
    /// - `EngineError::Validation` when the project has no entries, or
    ///   when zero entries pass the inclusion rule
    pub fn build(
        &self,
        project: &Project,
        entries: &[ScheduleEntry],
        visualization_type: &str,
        created_by: &str,
        created_at: NaiveDateTime,
        existing_versions: &[String],
    ) -> EngineResult<BaselineVersion> {
        let mut rows: Vec<&ScheduleEntry> = entries
            .iter()
            .filter(|e| e.project == project.name)
            .collect();

        if rows.is_empty() {
            return Err(EngineError::Validation(format!(
                "project '{}' has no schedule entries to snapshot",
                project.name
            )));
        }

        self.catalog_order_sort(&mut rows);

        let mut seen_codes: HashSet<String> = HashSet::new();
        let mut tasks: Vec<BaselineTaskSnapshot> = Vec::new();

        for entry in rows {
            if !entry.has_actual_data() {
                debug!(
                    project = project.name.as_str(),
                    stage = entry.stage_code.as_str(),
                    "entry has no actual data, excluded from baseline"
                );
                continue;
            }

            let (code, full_name, class) = match self.catalog.resolve(&entry.stage_code) {
                Some(stage) => (
                    stage.code.clone(),
                    Some(stage.full_name.clone()),
                    self.catalog.classify(&stage.code),
                ),
                None => (
                    entry.stage_code.clone(),
                    None,
                    self.catalog.classify(&entry.stage_code),
                ),
            };

            // Duplicate rows per logical stage: the first (aggregated)
            // row wins.
            if !seen_codes.insert(code.clone()) {
                continue;
            }

            tasks.push(BaselineTaskSnapshot {
                stage_code: code,
                stage_full_name: full_name,
                planned_start: entry.actual_start.or(entry.planned_start),
                planned_end: entry.actual_end.or(entry.planned_end),
                actual_start: entry.actual_start,
                actual_end: entry.actual_end,
                percent_complete: Some(entry.percent_complete),
                sector: Some(class.sector),
                group: Some(class.group),
                region_tag: Some(project.region.clone()),
            });
        }

        if tasks.is_empty() {
            return Err(EngineError::Validation(format!(
                "project '{}' has no entries with actual data, nothing to snapshot",
                project.name
            )));
        }

        let number = next_version_number(existing_versions.iter().map(|s| s.as_str()));
        let version_name = format_version_name(number, created_at.date());

        info!(
            project = project.name.as_str(),
            version = version_name.as_str(),
            tasks = tasks.len(),
            "baseline snapshot built"
        );

        Ok(BaselineVersion {
            project: project.name.clone(),
            version_name,
            created_at,
            created_by: created_by.to_string(),
            visualization_type: visualization_type.to_string(),
            tasks,
        })
    }

    fn catalog_order_sort(&self, rows: &mut [&ScheduleEntry]) {
        rows.sort_by_key(|e| {
            self.catalog
                .classify(&e.stage_code)
                .order_index
                .unwrap_or(usize::MAX)
        });
    }
}
