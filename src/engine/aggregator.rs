// ==========================================
// Obra Schedule - Stage Aggregator
// ==========================================
// Derives a parent stage's actual dates/progress from its children.
// Runs first, before simulation and reconciliation, because both
// downstream steps read parent actual dates.
// Invariants: idempotent, never mutates child records.
// ==========================================

use crate::catalog::StageCatalog;
use crate::domain::ScheduleEntry;
use chrono::NaiveDate;
use tracing::debug;

// ==========================================
// StageAggregator
// ==========================================
pub struct StageAggregator<'a> {
    catalog: &'a StageCatalog,
}

#[derive(Debug)]
struct DerivedActuals {
    actual_start: Option<NaiveDate>,
    actual_end: Option<NaiveDate>,
    percent_complete: f64,
}

impl<'a> StageAggregator<'a> {
    pub fn new(catalog: &'a StageCatalog) -> Self {
        Self { catalog }
    }

    /// Roll child actuals up into parent stages, per project.
    ///
    /// For each parent stage with children present in the working set:
    /// - `actual_start` = min of child actual starts (nulls ignored)
    /// - `actual_end` = max of child actual ends (nulls ignored)
    /// - `percent_complete` = mean of child percentages
    /// applied only when at least one child carries actual data, and
    /// overriding any value already stored on the parent. A parent row
    /// is synthesized when none exists yet.
    pub fn aggregate(&self, entries: &mut Vec<ScheduleEntry>) {
        let projects = distinct_projects(entries);
        let mut synthesized: Vec<ScheduleEntry> = Vec::new();

        for project in &projects {
            for parent in self.catalog.parent_stages() {
                let Some(derived) = self.derive_from_children(entries, project, &parent.code)
                else {
                    continue;
                };

                debug!(
                    project = project.as_str(),
                    stage = parent.code.as_str(),
                    "aggregated parent actuals from children"
                );

                let mut found = false;
                for entry in entries.iter_mut() {
                    if entry.project != *project {
                        continue;
                    }
                    let resolved = self
                        .catalog
                        .resolve(&entry.stage_code)
                        .map(|s| s.code.as_str());
                    if resolved == Some(parent.code.as_str()) {
                        entry.actual_start = derived.actual_start;
                        entry.actual_end = derived.actual_end;
                        entry.percent_complete = derived.percent_complete;
                        found = true;
                    }
                }

                if !found {
                    let mut entry = ScheduleEntry::new(project.clone(), parent.code.clone());
                    entry.actual_start = derived.actual_start;
                    entry.actual_end = derived.actual_end;
                    entry.percent_complete = derived.percent_complete;
                    synthesized.push(entry);
                }
            }
        }

        entries.extend(synthesized);
    }

    /// Child roll-up for one (project, parent). None when no child row
    /// carries actual data, so the parent stays untouched.
    fn derive_from_children(
        &self,
        entries: &[ScheduleEntry],
        project: &str,
        parent_code: &str,
    ) -> Option<DerivedActuals> {
        let mut actual_start: Option<NaiveDate> = None;
        let mut actual_end: Option<NaiveDate> = None;
        let mut percent_sum = 0.0;
        let mut child_rows = 0usize;
        let mut any_data = false;

        for entry in entries.iter().filter(|e| e.project == project) {
            let Some(stage) = self.catalog.resolve(&entry.stage_code) else {
                continue;
            };
            if stage.parent_code.as_deref() != Some(parent_code) {
                continue;
            }

            child_rows += 1;
            percent_sum += entry.percent_complete;
            any_data = any_data || entry.has_actual_data();

            if let Some(start) = entry.actual_start {
                actual_start = Some(actual_start.map_or(start, |s: NaiveDate| s.min(start)));
            }
            if let Some(end) = entry.actual_end {
                actual_end = Some(actual_end.map_or(end, |e: NaiveDate| e.max(end)));
            }
        }

        if child_rows == 0 || !any_data {
            return None;
        }

        Some(DerivedActuals {
            actual_start,
            actual_end,
            percent_complete: percent_sum / child_rows as f64,
        })
    }
}

fn distinct_projects(entries: &[ScheduleEntry]) -> Vec<String> {
    let mut projects: Vec<String> = Vec::new();
    for entry in entries {
        if !projects.iter().any(|p| p == &entry.project) {
            projects.push(entry.project.clone());
        }
    }
    projects
}
