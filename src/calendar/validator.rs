use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::calendar::CalendarDate;
use crate::error::{ClimateError, DateRejection, Result};
use crate::utils::constants::MONTH_LENGTHS;

/// Anchored at both ends: `2020-01-01-extra` is rejected.
fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("date pattern is a valid regex")
    })
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`, or `None` for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    if month == 2 && is_leap_year(year) {
        return Some(29);
    }
    Some(MONTH_LENGTHS[(month - 1) as usize])
}

fn rejected(input: &str, reason: DateRejection) -> ClimateError {
    ClimateError::InvalidDate {
        value: input.to_string(),
        reason,
    }
}

/// Validate a `YYYY-MM-DD` string into a [`CalendarDate`].
pub fn validate(input: &str) -> Result<CalendarDate> {
    let captures = date_pattern()
        .captures(input)
        .ok_or_else(|| rejected(input, DateRejection::Malformed))?;

    // The pattern guarantees ASCII digits of fixed width, so these parse.
    let component = |idx: usize| -> Result<u32> {
        captures[idx]
            .parse::<u32>()
            .map_err(|_| rejected(input, DateRejection::Malformed))
    };
    let year = component(1)? as i32;
    let month = component(2)?;
    let day = component(3)?;

    let max = days_in_month(year, month)
        .ok_or_else(|| rejected(input, DateRejection::MonthOutOfRange(month)))?;

    if day < 1 || day > max {
        return Err(rejected(input, DateRejection::DayOutOfRange { day, max }));
    }

    CalendarDate::from_ymd(year, month, day)
        .ok_or_else(|| rejected(input, DateRejection::DayOutOfRange { day, max }))
}

/// Validate a dynamically typed value. Anything but a JSON string is refused.
pub fn validate_value(value: &Value) -> Result<CalendarDate> {
    match value {
        Value::String(s) => validate(s),
        other => Err(rejected(&other.to_string(), DateRejection::NotAString)),
    }
}

/// Validate both ends of a range and require `start <= end`.
pub fn validate_range(start: &str, end: &str) -> Result<(CalendarDate, CalendarDate)> {
    let start = validate(start)?;
    let end = validate(end)?;
    ensure_ordered(start, end)?;
    Ok((start, end))
}

pub fn ensure_ordered(start: CalendarDate, end: CalendarDate) -> Result<()> {
    if start > end {
        return Err(ClimateError::InvalidRange { start, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reason_of(input: &str) -> DateRejection {
        match validate(input) {
            Err(ClimateError::InvalidDate { reason, .. }) => reason,
            other => panic!("expected InvalidDate for '{}', got {:?}", input, other),
        }
    }

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_february_29() {
        assert!(validate("2000-02-29").is_ok());
        assert!(validate("2024-02-29").is_ok());
        assert_eq!(
            reason_of("1900-02-29"),
            DateRejection::DayOutOfRange { day: 29, max: 28 }
        );
        assert_eq!(
            reason_of("2023-02-29"),
            DateRejection::DayOutOfRange { day: 29, max: 28 }
        );
    }

    #[test]
    fn test_every_valid_day_of_a_leap_year_round_trips() {
        for month in 1..=12u32 {
            let max = days_in_month(2016, month).unwrap();
            for day in 1..=max {
                let text = format!("2016-{:02}-{:02}", month, day);
                let date = validate(&text).unwrap();
                assert_eq!(Some(date), CalendarDate::from_ymd(2016, month, day));
                assert_eq!(date.to_string(), text);
            }
        }
    }

    #[test]
    fn test_month_out_of_range() {
        assert_eq!(reason_of("2020-00-10"), DateRejection::MonthOutOfRange(0));
        assert_eq!(reason_of("2020-13-10"), DateRejection::MonthOutOfRange(13));
        assert_eq!(reason_of("2020--1-10"), DateRejection::Malformed);
    }

    #[test]
    fn test_day_out_of_range() {
        assert_eq!(
            reason_of("2021-04-31"),
            DateRejection::DayOutOfRange { day: 31, max: 30 }
        );
        assert_eq!(
            reason_of("2021-01-00"),
            DateRejection::DayOutOfRange { day: 0, max: 31 }
        );
    }

    #[test]
    fn test_malformed_strings() {
        for input in [
            "",
            "2020-1-01",
            "20-01-01",
            "2020/01/01",
            "2020-01-01-extra-junk",
            " 2020-01-01",
            "2020-01-01 ",
            "abcd-ef-gh",
            "２０２０-01-01",
        ] {
            assert_eq!(reason_of(input), DateRejection::Malformed, "input {:?}", input);
        }
    }

    #[test]
    fn test_non_string_values_rejected() {
        for value in [json!(12345), json!(null), json!(["2020-01-01"]), json!(true)] {
            match validate_value(&value) {
                Err(ClimateError::InvalidDate { reason, .. }) => {
                    assert_eq!(reason, DateRejection::NotAString)
                }
                other => panic!("expected NotAString for {}, got {:?}", value, other),
            }
        }
        assert!(validate_value(&json!("2020-01-01")).is_ok());
    }

    #[test]
    fn test_range_order() {
        assert!(validate_range("2017-01-01", "2017-01-01").is_ok());
        assert!(validate_range("2016-12-31", "2017-01-01").is_ok());
        assert!(matches!(
            validate_range("2017-01-02", "2017-01-01"),
            Err(ClimateError::InvalidRange { .. })
        ));
        // Validation happens before the order check.
        assert!(matches!(
            validate_range("2017-02-30", "2016-01-01"),
            Err(ClimateError::InvalidDate { .. })
        ));
    }
}
