// ==========================================
// Obra Schedule - Timeline Coordinate Mapper
// ==========================================
// Shared interval math reused by variance reporting and layout.
// Positions are linear months since chart start plus a fractional
// day-of-month term. Pixel/HTML concerns live with the renderer.
// ==========================================

use chrono::{Datelike, NaiveDate};

// ==========================================
// TimelineMapper
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct TimelineMapper {
    chart_start: NaiveDate,
}

impl TimelineMapper {
    pub fn new(chart_start: NaiveDate) -> Self {
        Self { chart_start }
    }

    /// Months-since-chart-start offset plus a fractional day-of-month
    /// term. The first of a month sits exactly on a whole coordinate.
    pub fn position(&self, date: NaiveDate) -> f64 {
        let whole_months = i64::from(date.year() - self.chart_start.year()) * 12
            + i64::from(date.month() as i32 - self.chart_start.month() as i32);
        let fraction =
            f64::from(date.day() - 1) / f64::from(days_in_month(date.year(), date.month()));
        whole_months as f64 + fraction
    }

    /// Mapped interval, None when either bound is absent.
    pub fn span(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<(f64, f64)> {
        Some((self.position(start?), self.position(end?)))
    }
}

/// Does the actual interval fully contain the planned interval?
///
/// Drives the presentational stacking/overlap rule; absent bounds on
/// either side mean no containment.
pub fn interval_contains(
    outer_start: Option<NaiveDate>,
    outer_end: Option<NaiveDate>,
    inner_start: Option<NaiveDate>,
    inner_end: Option<NaiveDate>,
) -> bool {
    match (outer_start, outer_end, inner_start, inner_end) {
        (Some(os), Some(oe), Some(is), Some(ie)) => os <= is && oe >= ie,
        _ => false,
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}
