// ==========================================
// Obra Schedule - Variance & Status Classification
// ==========================================
// VT: planned-end vs. actual-end delta, in business days.
// VD: actual duration minus planned duration, in business days.
// The status rule lives here; rendering owns only presentation.
// ==========================================

use crate::calendar::BusinessCalendar;
use crate::domain::types::ScheduleStatus;
use crate::domain::ScheduleEntry;
use chrono::NaiveDate;

// ==========================================
// VarianceAssessment - per-row variance output
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceAssessment {
    pub vt_days: Option<i64>,
    pub vd_days: Option<i64>,
    pub vt_text: String,
    pub vd_text: String,
    pub status: ScheduleStatus,
}

// ==========================================
// VarianceEngine
// ==========================================
pub struct VarianceEngine {
    calendar: BusinessCalendar,
}

impl VarianceEngine {
    pub fn new(calendar: BusinessCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    /// Assess one entry against `reference_date` (the render date).
    pub fn assess(&self, entry: &ScheduleEntry, reference_date: NaiveDate) -> VarianceAssessment {
        let vt_days = self
            .calendar
            .end_variance(entry.planned_end, entry.actual_end);
        let vd_days = self.calendar.duration_variance(
            entry.planned_start,
            entry.planned_end,
            entry.actual_start,
            entry.actual_end,
        );

        VarianceAssessment {
            vt_days,
            vd_days,
            vt_text: format_variance(vt_days),
            vd_text: format_variance(vd_days),
            status: classify(entry, reference_date),
        }
    }
}

/// Status rule:
/// - finished stages compare actual end against planned end
/// - unfinished stages past their planned end are in-progress-overdue
/// - anything without enough data stays unclassified
fn classify(entry: &ScheduleEntry, reference_date: NaiveDate) -> ScheduleStatus {
    let Some(planned_end) = entry.planned_end else {
        return ScheduleStatus::Unclassified;
    };
    if let Some(actual_end) = entry.actual_end {
        if actual_end <= planned_end {
            return ScheduleStatus::OnTime;
        }
        return ScheduleStatus::Late;
    }
    if reference_date > planned_end && entry.percent_complete < 100.0 {
        return ScheduleStatus::InProgressOverdue;
    }
    ScheduleStatus::Unclassified
}

/// "+3d" / "-2d" / "0d"; absent inputs render as "-", never as zero.
fn format_variance(days: Option<i64>) -> String {
    match days {
        None => "-".to_string(),
        Some(0) => "0d".to_string(),
        Some(n) => format!("{:+}d", n),
    }
}
