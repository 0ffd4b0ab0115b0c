//! Month arithmetic for the monthly portfolio series.
//!
//! Every month is represented by its first day. Inputs that carry a
//! day-of-month are normalised to the start of that month.

use crate::error::{DashboardError, DashboardResult};
use chrono::{Datelike, Months, NaiveDate};

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Parse `YYYY-MM` or `YYYY-MM-DD` into a month start.
pub fn parse_month(input: &str) -> DashboardResult<NaiveDate> {
    let trimmed = input.trim();
    let parsed = if trimmed.len() == 7 {
        NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
    } else {
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
    };
    parsed
        .map(month_start)
        .map_err(|_| DashboardError::InvalidMonth { input: input.to_string() })
}

/// Every month start from `start` to `end`, both inclusive.
pub fn month_range(start: NaiveDate, end: NaiveDate) -> DashboardResult<Vec<NaiveDate>> {
    let start = month_start(start);
    let end = month_start(end);
    if end < start {
        return Err(DashboardError::InvalidDateRange { start, end });
    }

    let mut months = Vec::new();
    let mut current = start;
    while current <= end {
        months.push(current);
        current = current
            .checked_add_months(Months::new(1))
            .ok_or_else(|| DashboardError::InvalidConfig(format!("month overflow after {current}")))?;
    }
    Ok(months)
}

/// Calendar quarter (1..=4) of the month.
pub fn quarter_of(month: NaiveDate) -> u32 {
    1 + month.month0() / 3
}

/// Short label used on chart axes, e.g. `2024-01`.
pub fn month_label(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_short_and_full_forms() {
        assert_eq!(parse_month("2024-01").unwrap(), ymd(2024, 1, 1));
        assert_eq!(parse_month("2025-11-17").unwrap(), ymd(2025, 11, 1));
        assert!(parse_month("2024/01").is_err());
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn range_is_inclusive_and_crosses_years() {
        let months = month_range(ymd(2024, 11, 1), ymd(2025, 2, 1)).unwrap();
        assert_eq!(
            months,
            vec![ymd(2024, 11, 1), ymd(2024, 12, 1), ymd(2025, 1, 1), ymd(2025, 2, 1)]
        );
    }

    #[test]
    fn single_month_range() {
        let months = month_range(ymd(2024, 5, 20), ymd(2024, 5, 2)).unwrap();
        assert_eq!(months, vec![ymd(2024, 5, 1)]);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = month_range(ymd(2025, 1, 1), ymd(2024, 12, 1)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidDateRange { .. }));
    }

    #[test]
    fn quarters_follow_calendar() {
        assert_eq!(quarter_of(ymd(2024, 1, 1)), 1);
        assert_eq!(quarter_of(ymd(2024, 3, 1)), 1);
        assert_eq!(quarter_of(ymd(2024, 4, 1)), 2);
        assert_eq!(quarter_of(ymd(2024, 12, 1)), 4);
    }
}
