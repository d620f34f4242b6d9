// ==========================================
// Obra Schedule - Baseline Domain Model
// ==========================================
// A baseline is an immutable, named snapshot of planned dates taken for
// later plan-vs-plan comparison. Version names follow P{n}-({date}) with
// strictly increasing n per project.
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// BaselineVersion - a persisted snapshot
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineVersion {
    pub project: String,                  // owning project
    pub version_name: String,             // P{n}-({date})
    pub created_at: NaiveDateTime,        // creation timestamp
    pub created_by: String,               // operator
    pub visualization_type: String,       // rendering hint, pass-through
    pub tasks: Vec<BaselineTaskSnapshot>, // frozen per-stage rows
}

impl BaselineVersion {
    /// Numeric component of the version name, if the prefix parses.
    pub fn version_number(&self) -> Option<u32> {
        parse_version_number(&self.version_name)
    }

    pub fn total_tasks(&self) -> usize {
        self.tasks.len()
    }
}

// ==========================================
// BaselineTaskSnapshot - one frozen stage row
// ==========================================
// Every field except stage_code is optional with a serde default so the
// persisted schema can evolve without breaking old snapshots on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineTaskSnapshot {
    pub stage_code: String,
    #[serde(default)]
    pub stage_full_name: Option<String>,
    #[serde(default)]
    pub planned_start: Option<NaiveDate>,
    #[serde(default)]
    pub planned_end: Option<NaiveDate>,
    #[serde(default)]
    pub actual_start: Option<NaiveDate>,
    #[serde(default)]
    pub actual_end: Option<NaiveDate>,
    #[serde(default)]
    pub percent_complete: Option<f64>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub region_tag: Option<String>,
}

// ==========================================
// Version naming
// ==========================================

/// Parse the numeric component of a `P{n}-({date})` version name.
///
/// Non-numeric suffixes yield None instead of an error so naming never
/// crashes on legacy or hand-edited version names.
pub fn parse_version_number(name: &str) -> Option<u32> {
    let rest = name.strip_prefix('P')?;
    let digits: &str = match rest.find('-') {
        Some(pos) => &rest[..pos],
        None => rest,
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u32>().ok()
}

/// Next version number given the existing names: max(n) + 1, starting at 1.
pub fn next_version_number<'a>(existing: impl IntoIterator<Item = &'a str>) -> u32 {
    existing
        .into_iter()
        .filter_map(parse_version_number)
        .max()
        .unwrap_or(0)
        + 1
}

/// Format a version name as `P{n}-({date})`.
pub fn format_version_name(number: u32, date: NaiveDate) -> String {
    format!("P{}-({})", number, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_number() {
        assert_eq!(parse_version_number("P1-(2025-03-01)"), Some(1));
        assert_eq!(parse_version_number("P12-(2025-03-01)"), Some(12));
        assert_eq!(parse_version_number("P3"), Some(3));
        assert_eq!(parse_version_number("Px-(2025-03-01)"), None);
        assert_eq!(parse_version_number("baseline-old"), None);
        assert_eq!(parse_version_number("P-(2025-03-01)"), None);
    }

    #[test]
    fn test_next_version_number_skips_gaps_and_junk() {
        // existing {P1, P3} => next is P4
        assert_eq!(next_version_number(["P1-(2025-01-01)", "P3-(2025-02-01)"]), 4);
        // non-numeric suffixes are ignored defensively
        assert_eq!(
            next_version_number(["P2-(2025-01-01)", "Pfinal", "legacy"]),
            3
        );
        assert_eq!(next_version_number([]), 1);
    }

    #[test]
    fn test_format_version_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_version_name(4, date), "P4-(2025-03-07)");
        assert_eq!(parse_version_number(&format_version_name(4, date)), Some(4));
    }
}
