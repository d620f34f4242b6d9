// ==========================================
// Obra Schedule - Buffer ("Pulmao") Simulator
// ==========================================
// Applies a month offset to planned dates by stage class. Runs after
// baseline reconciliation so the what-if layer applies on top of
// whichever baseline (including P0) is active.
// Invariant: actual_* fields are immutable under simulation.
// ==========================================

use crate::catalog::StageCatalog;
use crate::domain::types::BufferClass;
use crate::domain::ScheduleEntry;
use chrono::{Months, NaiveDate};

// ==========================================
// BufferSimulator
// ==========================================
pub struct BufferSimulator<'a> {
    catalog: &'a StageCatalog,
}

impl<'a> BufferSimulator<'a> {
    pub fn new(catalog: &'a StageCatalog) -> Self {
        Self { catalog }
    }

    /// Shift planned dates by `offset_months` according to each stage's
    /// buffer class:
    /// - unaffected: never shifted
    /// - buffer marker: only planned_start shifts
    /// - standard: planned_start and planned_end shift
    pub fn simulate(&self, entries: &mut [ScheduleEntry], offset_months: i32, enabled: bool) {
        if !enabled || offset_months == 0 {
            return;
        }

        for entry in entries.iter_mut() {
            match self.catalog.buffer_class(&entry.stage_code) {
                BufferClass::Unaffected => {}
                BufferClass::BufferMarker => {
                    entry.planned_start =
                        entry.planned_start.map(|d| shift_months(d, offset_months));
                }
                BufferClass::Standard => {
                    entry.planned_start =
                        entry.planned_start.map(|d| shift_months(d, offset_months));
                    entry.planned_end = entry.planned_end.map(|d| shift_months(d, offset_months));
                }
            }
        }
    }
}

/// Standard calendar month-add: the day-of-month is preserved when
/// valid in the target month, else clamped to that month's last day.
pub fn shift_months(date: NaiveDate, offset_months: i32) -> NaiveDate {
    if offset_months >= 0 {
        date.checked_add_months(Months::new(offset_months as u32))
            .unwrap_or(date)
    } else {
        date.checked_sub_months(Months::new(offset_months.unsigned_abs()))
            .unwrap_or(date)
    }
}
