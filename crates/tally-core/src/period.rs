//! Calendar month helpers
//!
//! Months are identified by `YYYY-MM` strings throughout the API and storage.
//! All boundaries are computed in UTC.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::validation::validate_month;

/// Format a date's month as `YYYY-MM`
pub fn format_month(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// The current UTC month as `YYYY-MM`
pub fn current_month() -> String {
    format_month(Utc::now().date_naive())
}

/// Split a `YYYY-MM` string into (year, month)
pub fn parse_month(month: &str) -> Result<(i32, u32)> {
    validate_month(month)?;
    let year: i32 = month[..4]
        .parse()
        .map_err(|_| Error::InvalidData(format!("Invalid year in {}", month)))?;
    let mm: u32 = month[5..]
        .parse()
        .map_err(|_| Error::InvalidData(format!("Invalid month in {}", month)))?;
    Ok((year, mm))
}

/// The month before `month` (`2024-01` -> `2023-12`)
pub fn previous_month(month: &str) -> Result<String> {
    let (year, mm) = parse_month(month)?;
    Ok(if mm == 1 {
        format!("{:04}-12", year - 1)
    } else {
        format!("{:04}-{:02}", year, mm - 1)
    })
}

/// The month after `month` (`2024-12` -> `2025-01`)
pub fn next_month(month: &str) -> Result<String> {
    let (year, mm) = parse_month(month)?;
    Ok(if mm == 12 {
        format!("{:04}-01", year + 1)
    } else {
        format!("{:04}-{:02}", year, mm + 1)
    })
}

/// The `count` months ending at `month`, oldest first
pub fn trailing_months(month: &str, count: usize) -> Result<Vec<String>> {
    let mut months = Vec::with_capacity(count);
    let mut cursor = month.to_string();
    for _ in 0..count {
        let prev = previous_month(&cursor)?;
        months.push(cursor);
        cursor = prev;
    }
    months.reverse();
    Ok(months)
}

/// First calendar day of the month
pub fn first_day_of_month(month: &str) -> Result<NaiveDate> {
    let (year, mm) = parse_month(month)?;
    NaiveDate::from_ymd_opt(year, mm, 1)
        .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}", month)))
}

/// Last calendar day of the month
pub fn last_day_of_month(month: &str) -> Result<NaiveDate> {
    let next = first_day_of_month(&next_month(month)?)?;
    next.pred_opt()
        .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}", month)))
}

/// Number of days in the month
pub fn days_in_month(month: &str) -> Result<u32> {
    Ok(last_day_of_month(month)?.day())
}

/// Days elapsed in the date's month, counting the date itself
pub fn days_elapsed(date: NaiveDate) -> u32 {
    date.day()
}

/// Inclusive UTC bounds covering the whole month: the first day at 00:00:00
/// through the last day at 23:59:59.
pub fn month_bounds(month: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = first_day_of_month(month)?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}", month)))?
        .and_utc();
    let end = last_day_of_month(month)?
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}", month)))?
        .and_utc();
    Ok((start, end))
}

/// Inclusive UTC bounds for a date range (`from` 00:00:00 through `to` 23:59:59)
pub fn day_range_bounds(from: NaiveDate, to: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = from
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::InvalidData(format!("Invalid date: {}", from)))?
        .and_utc();
    let end = to
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| Error::InvalidData(format!("Invalid date: {}", to)))?
        .and_utc();
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_and_next_month_wrap_years() {
        assert_eq!(previous_month("2024-01").unwrap(), "2023-12");
        assert_eq!(previous_month("2024-10").unwrap(), "2024-09");
        assert_eq!(next_month("2024-12").unwrap(), "2025-01");
        assert_eq!(next_month("2024-09").unwrap(), "2024-10");
        assert!(previous_month("2024-13").is_err());
    }

    #[test]
    fn test_non_ascii_month_is_an_error() {
        assert!(parse_month("٢٠٢٤-٠٣").is_err());
        assert!(previous_month("٢٠٢٤-٠٣").is_err());
        assert!(month_bounds("٢٠٢٤-٠٣").is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month("2024-02").unwrap(), 29);
        assert_eq!(days_in_month("2023-02").unwrap(), 28);
        assert_eq!(days_in_month("2024-04").unwrap(), 30);
        assert_eq!(days_in_month("2024-12").unwrap(), 31);
    }

    #[test]
    fn test_month_bounds_cover_last_day() {
        let (start, end) = month_bounds("2024-02").unwrap();
        assert_eq!(start.to_rfc3339(), "2024-02-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-02-29T23:59:59+00:00");
    }

    #[test]
    fn test_trailing_months() {
        let months = trailing_months("2024-02", 3).unwrap();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
        assert!(trailing_months("2024-02", 0).unwrap().is_empty());
    }

    #[test]
    fn test_days_elapsed_and_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(days_elapsed(date), 17);
        assert_eq!(format_month(date), "2024-03");
    }
}
