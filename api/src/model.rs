//! Shared row types for the two dashboard tables.

use serde::{Deserialize, Serialize};
use time::Date;

/// One country/date observation of cumulative pandemic counts.
///
/// Counts are `None` when the source reported nothing or a zero (zeros in the
/// upstream table stand for "not yet tracked", not an actual measurement).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub country: String,
    pub date: Date,
    pub confirmed: Option<u64>,
    pub deaths: Option<u64>,
    pub recovered: Option<u64>,
}

impl CaseRecord {
    /// Number of non-missing measurements on this row.
    pub fn observed_count(&self) -> usize {
        [self.confirmed, self.deaths, self.recovered]
            .iter()
            .filter(|value| value.is_some())
            .count()
    }
}

/// One government policy action recorded for a country/date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureRecord {
    pub country: String,
    pub date_implemented: Date,
    pub measure: String,
    pub comments: String,
    /// Pre-built hover text: formatted date, measure title and comments,
    /// word-wrapped with `<br>` between lines.
    pub display_text: String,
}

/// Everything the dashboard client needs, loaded once at server startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub cases: Vec<CaseRecord>,
    pub measures: Vec<MeasureRecord>,
    /// Distinct country names from the case table, sorted for the dropdown.
    pub countries: Vec<String>,
}
