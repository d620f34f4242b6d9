// ==========================================
// Obra Schedule - Business Calendar
// ==========================================
// Signed business-day arithmetic between calendar dates, excluding
// weekends and a configurable holiday set (empty by default).
// Absent dates yield None, never zero, so "no data" is never confused
// with "on time".
// ==========================================

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;

// ==========================================
// BusinessCalendar
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BusinessCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl BusinessCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holidays(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }

    /// Signed business-day delta between two dates.
    ///
    /// Counts business days after `from` up to and including `to`;
    /// negative when `to` precedes `from`. Returns None when either
    /// date is absent.
    pub fn business_days_between(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Option<i64> {
        let (from, to) = (from?, to?);
        if from == to {
            return Some(0);
        }
        let (lo, hi, sign) = if to > from {
            (from, to, 1)
        } else {
            (to, from, -1)
        };
        let mut count = 0i64;
        let mut day = lo + Duration::days(1);
        while day <= hi {
            if self.is_business_day(day) {
                count += 1;
            }
            day += Duration::days(1);
        }
        Some(sign * count)
    }

    /// Business-day duration of an interval, inclusive of both ends.
    pub fn duration_business_days(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<i64> {
        let (start, end) = (start?, end?);
        if end < start {
            return self.business_days_between(Some(start), Some(end));
        }
        let between = self.business_days_between(Some(start), Some(end))?;
        Some(between + i64::from(self.is_business_day(start)))
    }

    /// VT: planned-end vs. actual-end delta. Positive means the stage
    /// finished after its plan.
    pub fn end_variance(
        &self,
        planned_end: Option<NaiveDate>,
        actual_end: Option<NaiveDate>,
    ) -> Option<i64> {
        self.business_days_between(planned_end, actual_end)
    }

    /// VD: actual duration minus planned duration.
    pub fn duration_variance(
        &self,
        planned_start: Option<NaiveDate>,
        planned_end: Option<NaiveDate>,
        actual_start: Option<NaiveDate>,
        actual_end: Option<NaiveDate>,
    ) -> Option<i64> {
        let planned = self.duration_business_days(planned_start, planned_end)?;
        let actual = self.duration_business_days(actual_start, actual_end)?;
        Some(actual - planned)
    }
}
