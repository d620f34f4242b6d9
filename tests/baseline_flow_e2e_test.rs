// ==========================================
// Baseline flow end-to-end tests
// ==========================================
// Full pipeline over a SQLite store:
//   raw entries -> aggregate -> snapshot -> reconcile -> simulate
// plus the rendering contract output (ordering, VT/VD, status).
// ==========================================


use obra_schedule::api::{BaselineApi, ScheduleApi};
use obra_schedule::calendar::BusinessCalendar;
use obra_schedule::catalog::StageCatalog;
use obra_schedule::domain::types::ScheduleStatus;
use obra_schedule::domain::ScheduleEntry;
use obra_schedule::engine::{RenderOrchestrator, ScheduleRow};
use obra_schedule::repository::SqliteBaselineStore;
use std::sync::Arc;
use test_helpers::*;

fn schedule_api() -> (tempfile::NamedTempFile, ScheduleApi) {
    let (tmp, conn) = create_test_db();
    let catalog = Arc::new(StageCatalog::standard());
    let store = Arc::new(SqliteBaselineStore::new(conn));
    let baselines = Arc::new(BaselineApi::new(Arc::clone(&catalog), store));
    let orchestrator = RenderOrchestrator::new(catalog, BusinessCalendar::new());
    (tmp, ScheduleApi::new(orchestrator, baselines))
}

/// Working set for the reference scenario: parent TER with children
/// TCF [01-01, 01-10] and TDR [01-05, 01-20], plus a standard stage
/// FND planned [02-01, 02-15] with no actuals yet.
fn scenario_entries(project: &str) -> Vec<ScheduleEntry> {
    vec![
        actual_entry(project, "TCF", d(2025, 1, 1), d(2025, 1, 10), 100.0),
        actual_entry(project, "TDR", d(2025, 1, 5), d(2025, 1, 20), 50.0),
        planned_entry(project, "FND", d(2025, 2, 1), d(2025, 2, 15)),
    ]
}

fn find_row<'a>(rows: &'a [ScheduleRow], stage_code: &str) -> &'a ScheduleRow {
    rows.iter()
        .find(|r| r.stage_code == stage_code)
        .unwrap_or_else(|| panic!("row for stage {} not found", stage_code))
}

#[test]
fn test_live_render_aggregates_parents() {
    let (_tmp, api) = schedule_api();
    let project = test_project();

    let rows = api
        .render_schedule(
            &project,
            scenario_entries(&project.name),
            None,
            0,
            false,
            d(2025, 3, 1),
        )
        .expect("render");

    let parent = find_row(&rows, "TER");
    assert_eq!(parent.actual_start, Some(d(2025, 1, 1)));
    assert_eq!(parent.actual_end, Some(d(2025, 1, 20)));
    assert_eq!(parent.percent_complete, 75.0);

    // catalog order: TER before its children, children before FND
    let positions: Vec<usize> = ["TER", "TCF", "TDR", "FND"]
        .iter()
        .map(|code| rows.iter().position(|r| &r.stage_code == code).expect("row"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_baseline_freezes_aggregated_parent_plan() {
    let (_tmp, api) = schedule_api();
    let project = test_project();

    let baseline = api
        .baselines()
        .create_baseline(&project, &scenario_entries(&project.name), "gantt", "planner")
        .expect("baseline");

    // the parent's frozen plan is its aggregated actual window
    let parent_task = baseline
        .tasks
        .iter()
        .find(|t| t.stage_code == "TER")
        .expect("parent task");
    assert_eq!(parent_task.planned_start, Some(d(2025, 1, 1)));
    assert_eq!(parent_task.planned_end, Some(d(2025, 1, 20)));

    // FND has no actual data: excluded despite its planned dates
    assert!(baseline.tasks.iter().all(|t| t.stage_code != "FND"));
}

#[test]
fn test_reconcile_round_trip_against_snapshot() {
    let (_tmp, api) = schedule_api();
    let project = test_project();
    let entries = scenario_entries(&project.name);

    let baseline = api
        .baselines()
        .create_baseline(&project, &entries, "gantt", "planner")
        .expect("baseline");

    let rows = api
        .render_schedule(
            &project,
            entries.clone(),
            Some(&baseline.version_name),
            0,
            false,
            d(2025, 3, 1),
        )
        .expect("render against baseline");

    // included stages reproduce the snapshot's planned values
    for task in &baseline.tasks {
        let row = find_row(&rows, &task.stage_code);
        assert_eq!(row.planned_start, task.planned_start);
        assert_eq!(row.planned_end, task.planned_end);
    }
    // excluded stages become explicitly empty
    let fnd = find_row(&rows, "FND");
    assert_eq!(fnd.planned_start, None);
    assert_eq!(fnd.planned_end, None);
}

#[test]
fn test_p0_after_baseline_restores_live_plan() {
    let (_tmp, api) = schedule_api();
    let project = test_project();
    let entries = scenario_entries(&project.name);

    let baseline = api
        .baselines()
        .create_baseline(&project, &entries, "gantt", "planner")
        .expect("baseline");

    let against_baseline = api
        .render_schedule(
            &project,
            entries.clone(),
            Some(&baseline.version_name),
            0,
            false,
            d(2025, 3, 1),
        )
        .expect("render against baseline");
    assert_eq!(find_row(&against_baseline, "FND").planned_start, None);

    // a later P0 render of the same working set sees the live plan again
    let live = api
        .render_schedule(&project, entries, Some("P0"), 0, false, d(2025, 3, 1))
        .expect("render live");
    let fnd = find_row(&live, "FND");
    assert_eq!(fnd.planned_start, Some(d(2025, 2, 1)));
    assert_eq!(fnd.planned_end, Some(d(2025, 2, 15)));
}

#[test]
fn test_buffer_applies_on_top_of_live() {
    let (_tmp, api) = schedule_api();
    let project = test_project();

    let rows = api
        .render_schedule(
            &project,
            scenario_entries(&project.name),
            None,
            1,
            true,
            d(2025, 3, 1),
        )
        .expect("render with buffer");

    // standard stage under a +1-month buffer
    let fnd = find_row(&rows, "FND");
    assert_eq!(fnd.planned_start, Some(d(2025, 3, 1)));
    assert_eq!(fnd.planned_end, Some(d(2025, 3, 15)));
    // actuals untouched on every stage
    let tcf = find_row(&rows, "TCF");
    assert_eq!(tcf.actual_start, Some(d(2025, 1, 1)));
    assert_eq!(tcf.actual_end, Some(d(2025, 1, 10)));
}

#[test]
fn test_buffer_applies_after_reconciliation() {
    let (_tmp, api) = schedule_api();
    let project = test_project();
    let entries = scenario_entries(&project.name);

    let baseline = api
        .baselines()
        .create_baseline(&project, &entries, "gantt", "planner")
        .expect("baseline");

    let rows = api
        .render_schedule(
            &project,
            entries,
            Some(&baseline.version_name),
            1,
            true,
            d(2025, 3, 1),
        )
        .expect("render");

    // the buffer shifts the baseline's frozen plan, not the live one
    let parent = find_row(&rows, "TER");
    assert_eq!(parent.planned_start, Some(d(2025, 2, 1)));
    assert_eq!(parent.planned_end, Some(d(2025, 2, 20)));
    // a stage nulled by reconciliation has nothing to shift
    let fnd = find_row(&rows, "FND");
    assert_eq!(fnd.planned_start, None);
}

#[test]
fn test_rendering_contract_vt_vd_and_status() {
    let (_tmp, api) = schedule_api();
    let project = test_project();
    // planned Mon 01-06 .. Fri 01-17, finished Wed 01-22: 3 business days late
    let entries = vec![
        full_entry(
            &project.name,
            "FND",
            (d(2025, 1, 6), d(2025, 1, 17)),
            (d(2025, 1, 6), d(2025, 1, 22)),
            100.0,
        ),
        // past its planned end, still unfinished
        planned_entry(&project.name, "EST", d(2025, 1, 6), d(2025, 1, 31)),
    ];

    let rows = api
        .render_schedule(&project, entries, None, 0, false, d(2025, 2, 10))
        .expect("render");

    let fnd = find_row(&rows, "FND");
    assert_eq!(fnd.vt_days, Some(3));
    assert_eq!(fnd.vt_text, "+3d");
    assert_eq!(fnd.vd_days, Some(3));
    assert_eq!(fnd.status, ScheduleStatus::Late);
    assert_eq!(fnd.stage_full_name, "Foundations");
    assert_eq!(fnd.sector, "infrastructure");

    let est = find_row(&rows, "EST");
    assert_eq!(est.vt_days, None);
    assert_eq!(est.vt_text, "-");
    assert_eq!(est.status, ScheduleStatus::InProgressOverdue);

    // stacking rule input: FND's actual window envelops its plan
    assert!(fnd.actual_contains_planned);
    assert!(!est.actual_contains_planned);
}

#[test]
fn test_missing_baseline_renders_live_instead_of_failing() {
    let (_tmp, api) = schedule_api();
    let project = test_project();

    let rows = api
        .render_schedule(
            &project,
            scenario_entries(&project.name),
            Some("P42-(2030-01-01)"),
            0,
            false,
            d(2025, 3, 1),
        )
        .expect("render degrades to live");

    let fnd = find_row(&rows, "FND");
    assert_eq!(fnd.planned_start, Some(d(2025, 2, 1)));
}
