//! # Reporting Date Math
//!
//! Pure helpers behind the reports layer: date-range presets, the
//! previous period of a range, and period-over-period growth.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// =============================================================================
// Date Ranges
// =============================================================================

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Number of days in the range, inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Preset reporting windows offered by the reports UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangePreset {
    /// Last 7 days including today.
    Last7Days,
    /// Last 30 days including today.
    Last30Days,
    /// Last 90 days including today.
    Last90Days,
    /// Last 365 days including today.
    Last365Days,
    /// Month to date.
    MonthToDate,
    /// Year to date.
    YearToDate,
}

impl RangePreset {
    /// Parses the CLI form ("7d", "30d", "90d", "365d", "mtd", "ytd").
    pub fn parse(s: &str) -> Option<RangePreset> {
        match s.to_ascii_lowercase().as_str() {
            "7d" => Some(RangePreset::Last7Days),
            "30d" => Some(RangePreset::Last30Days),
            "90d" => Some(RangePreset::Last90Days),
            "365d" => Some(RangePreset::Last365Days),
            "mtd" => Some(RangePreset::MonthToDate),
            "ytd" => Some(RangePreset::YearToDate),
            _ => None,
        }
    }

    /// Resolves the preset into concrete bounds ending at `today`.
    pub fn date_bounds(&self, today: NaiveDate) -> DateRange {
        let start = match self {
            RangePreset::Last7Days => today - Duration::days(6),
            RangePreset::Last30Days => today - Duration::days(29),
            RangePreset::Last90Days => today - Duration::days(89),
            RangePreset::Last365Days => today - Duration::days(364),
            RangePreset::MonthToDate => today.with_day(1).unwrap_or(today),
            RangePreset::YearToDate => {
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today)
            }
        };
        DateRange::new(start, today)
    }
}

/// The window of equal length immediately preceding `range`.
/// Used for period-over-period comparisons.
pub fn previous_period(range: DateRange) -> DateRange {
    let len = range.days();
    let end = range.start - Duration::days(1);
    let start = end - Duration::days(len - 1);
    DateRange::new(start, end)
}

// =============================================================================
// Growth
// =============================================================================

/// Period-over-period growth percentage.
///
/// A zero previous value reports 100% when the current value is positive
/// and 0% otherwise, instead of dividing by zero.
pub fn growth_percent(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    (current - previous) as f64 * 100.0 / previous as f64
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(RangePreset::parse("7d"), Some(RangePreset::Last7Days));
        assert_eq!(RangePreset::parse("MTD"), Some(RangePreset::MonthToDate));
        assert_eq!(RangePreset::parse("2w"), None);
    }

    #[test]
    fn test_last_7_days_includes_today() {
        let today = date(2026, 1, 8);
        let range = RangePreset::Last7Days.date_bounds(today);
        assert_eq!(range.start, date(2026, 1, 2));
        assert_eq!(range.end, today);
        assert_eq!(range.days(), 7);
    }

    #[test]
    fn test_month_to_date() {
        let range = RangePreset::MonthToDate.date_bounds(date(2026, 1, 8));
        assert_eq!(range.start, date(2026, 1, 1));
        assert_eq!(range.days(), 8);
    }

    #[test]
    fn test_year_to_date() {
        let range = RangePreset::YearToDate.date_bounds(date(2026, 3, 15));
        assert_eq!(range.start, date(2026, 1, 1));
        assert_eq!(range.end, date(2026, 3, 15));
    }

    #[test]
    fn test_previous_period_adjacent_and_equal_length() {
        let range = DateRange::new(date(2026, 1, 2), date(2026, 1, 8));
        let prev = previous_period(range);
        assert_eq!(prev.end, date(2026, 1, 1));
        assert_eq!(prev.start, date(2025, 12, 26));
        assert_eq!(prev.days(), range.days());
    }

    #[test]
    fn test_previous_period_crosses_year() {
        let range = RangePreset::Last30Days.date_bounds(date(2026, 1, 15));
        let prev = previous_period(range);
        assert_eq!(prev.end, range.start - Duration::days(1));
        assert_eq!(prev.days(), 30);
    }

    #[test]
    fn test_growth_percent() {
        assert_eq!(growth_percent(150, 100), 50.0);
        assert_eq!(growth_percent(50, 100), -50.0);
        assert_eq!(growth_percent(100, 100), 0.0);
        // Zero previous never divides.
        assert_eq!(growth_percent(42, 0), 100.0);
        assert_eq!(growth_percent(0, 0), 0.0);
    }
}
