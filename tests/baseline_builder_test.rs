// ==========================================
// Baseline Snapshot Builder tests
// ==========================================
// Coverage:
// 1. actual-first freezing with planned fallback
// 2. inclusion rule (no actual data -> dropped)
// 3. validation errors
// 4. version numbering and naming
// 5. taxonomy fields on tasks
// ==========================================


use obra_schedule::catalog::StageCatalog;
use obra_schedule::engine::{BaselineSnapshotBuilder, EngineError, StageAggregator};
use test_helpers::*;

fn created_at() -> chrono::NaiveDateTime {
    d(2025, 3, 7).and_hms_opt(10, 30, 0).expect("valid time")
}

#[test]
fn test_actual_dates_become_the_frozen_plan() {
    let catalog = StageCatalog::standard();
    let project = test_project();
    let entries = vec![full_entry(
        &project.name,
        "FND",
        (d(2025, 1, 1), d(2025, 1, 20)),
        (d(2025, 1, 5), d(2025, 1, 25)),
        100.0,
    )];

    let baseline = BaselineSnapshotBuilder::new(&catalog)
        .build(&project, &entries, "gantt", "planner", created_at(), &[])
        .expect("baseline");

    assert_eq!(baseline.tasks.len(), 1);
    let task = &baseline.tasks[0];
    assert_eq!(task.stage_code, "FND");
    assert_eq!(task.planned_start, Some(d(2025, 1, 5)));
    assert_eq!(task.planned_end, Some(d(2025, 1, 25)));
    assert_eq!(task.actual_start, Some(d(2025, 1, 5)));
    assert_eq!(task.actual_end, Some(d(2025, 1, 25)));
    assert_eq!(task.percent_complete, Some(100.0));
}

#[test]
fn test_planned_fallback_when_actual_absent() {
    let catalog = StageCatalog::standard();
    let project = test_project();
    // started but not finished: the end freezes from the current plan
    let mut entry = planned_entry(&project.name, "FND", d(2025, 1, 1), d(2025, 1, 20));
    entry.actual_start = Some(d(2025, 1, 5));
    entry.percent_complete = 40.0;

    let baseline = BaselineSnapshotBuilder::new(&catalog)
        .build(&project, &[entry], "gantt", "planner", created_at(), &[])
        .expect("baseline");

    let task = &baseline.tasks[0];
    assert_eq!(task.planned_start, Some(d(2025, 1, 5)));
    assert_eq!(task.planned_end, Some(d(2025, 1, 20)));
    assert_eq!(task.actual_end, None);
}

#[test]
fn test_entries_without_actual_data_are_dropped() {
    let catalog = StageCatalog::standard();
    let project = test_project();
    let entries = vec![
        actual_entry(&project.name, "FND", d(2025, 1, 5), d(2025, 1, 25), 100.0),
        // planned dates only: absent from the snapshot, not zero-filled
        planned_entry(&project.name, "EST", d(2025, 2, 1), d(2025, 3, 15)),
    ];

    let baseline = BaselineSnapshotBuilder::new(&catalog)
        .build(&project, &entries, "gantt", "planner", created_at(), &[])
        .expect("baseline");

    assert_eq!(baseline.tasks.len(), 1);
    assert_eq!(baseline.tasks[0].stage_code, "FND");
}

#[test]
fn test_no_entries_is_a_validation_error() {
    let catalog = StageCatalog::standard();
    let project = test_project();

    let result =
        BaselineSnapshotBuilder::new(&catalog).build(&project, &[], "gantt", "planner", created_at(), &[]);

    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[test]
fn test_zero_included_entries_is_a_validation_error() {
    let catalog = StageCatalog::standard();
    let project = test_project();
    let entries = vec![planned_entry(&project.name, "FND", d(2025, 1, 1), d(2025, 1, 20))];

    let result = BaselineSnapshotBuilder::new(&catalog)
        .build(&project, &entries, "gantt", "planner", created_at(), &[]);

    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[test]
fn test_version_numbering_continues_from_max() {
    let catalog = StageCatalog::standard();
    let project = test_project();
    let entries = vec![actual_entry(&project.name, "FND", d(2025, 1, 5), d(2025, 1, 25), 100.0)];
    let existing = vec![
        "P1-(2025-01-01)".to_string(),
        "P3-(2025-02-01)".to_string(),
        "draft-final".to_string(), // skipped safely
    ];

    let baseline = BaselineSnapshotBuilder::new(&catalog)
        .build(&project, &entries, "gantt", "planner", created_at(), &existing)
        .expect("baseline");

    assert_eq!(baseline.version_name, "P4-(2025-03-07)");
    assert_eq!(baseline.version_number(), Some(4));
}

#[test]
fn test_first_version_is_p1() {
    let catalog = StageCatalog::standard();
    let project = test_project();
    let entries = vec![actual_entry(&project.name, "FND", d(2025, 1, 5), d(2025, 1, 25), 100.0)];

    let baseline = BaselineSnapshotBuilder::new(&catalog)
        .build(&project, &entries, "gantt", "planner", created_at(), &[])
        .expect("baseline");

    assert_eq!(baseline.version_name, "P1-(2025-03-07)");
}

#[test]
fn test_parent_freezes_aggregated_actuals() {
    let catalog = StageCatalog::standard();
    let project = test_project();
    let mut entries = vec![
        actual_entry(&project.name, "TCF", d(2025, 1, 1), d(2025, 1, 10), 100.0),
        actual_entry(&project.name, "TDR", d(2025, 1, 5), d(2025, 1, 20), 50.0),
        // authored parent plan: the aggregated actual takes priority
        planned_entry(&project.name, "TER", d(2025, 1, 1), d(2025, 2, 28)),
    ];
    StageAggregator::new(&catalog).aggregate(&mut entries);

    let baseline = BaselineSnapshotBuilder::new(&catalog)
        .build(&project, &entries, "gantt", "planner", created_at(), &[])
        .expect("baseline");

    let parent = baseline
        .tasks
        .iter()
        .find(|t| t.stage_code == "TER")
        .expect("parent task");
    assert_eq!(parent.planned_start, Some(d(2025, 1, 1)));
    assert_eq!(parent.planned_end, Some(d(2025, 1, 20)));
}

#[test]
fn test_tasks_carry_taxonomy_and_region() {
    let catalog = StageCatalog::standard();
    let project = test_project();
    let entries = vec![actual_entry(&project.name, "Foundations", d(2025, 1, 5), d(2025, 1, 25), 100.0)];

    let baseline = BaselineSnapshotBuilder::new(&catalog)
        .build(&project, &entries, "gantt", "planner", created_at(), &[])
        .expect("baseline");

    let task = &baseline.tasks[0];
    // stored under the canonical short code regardless of input scheme
    assert_eq!(task.stage_code, "FND");
    assert_eq!(task.stage_full_name.as_deref(), Some("Foundations"));
    assert_eq!(task.sector.as_deref(), Some("infrastructure"));
    assert_eq!(task.group.as_deref(), Some("civil"));
    assert_eq!(task.region_tag.as_deref(), Some("south"));
}

#[test]
fn test_tasks_follow_catalog_order_and_dedup() {
    let catalog = StageCatalog::standard();
    let project = test_project();
    let entries = vec![
        actual_entry(&project.name, "EST", d(2025, 3, 1), d(2025, 4, 1), 80.0),
        actual_entry(&project.name, "FND", d(2025, 1, 5), d(2025, 1, 25), 100.0),
        // duplicate row for the same logical stage
        actual_entry(&project.name, "Foundations", d(2025, 1, 6), d(2025, 1, 26), 90.0),
    ];

    let baseline = BaselineSnapshotBuilder::new(&catalog)
        .build(&project, &entries, "gantt", "planner", created_at(), &[])
        .expect("baseline");

    let codes: Vec<&str> = baseline.tasks.iter().map(|t| t.stage_code.as_str()).collect();
    assert_eq!(codes, vec!["FND", "EST"]);
}

#[test]
fn test_other_projects_are_excluded() {
    let catalog = StageCatalog::standard();
    let project = test_project();
    let entries = vec![
        actual_entry(&project.name, "FND", d(2025, 1, 5), d(2025, 1, 25), 100.0),
        actual_entry("Obra Litoral", "EST", d(2025, 3, 1), d(2025, 4, 1), 80.0),
    ];

    let baseline = BaselineSnapshotBuilder::new(&catalog)
        .build(&project, &entries, "gantt", "planner", created_at(), &[])
        .expect("baseline");

    assert_eq!(baseline.tasks.len(), 1);
    assert_eq!(baseline.project, project.name);
}
