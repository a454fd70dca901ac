//! Field validation shared by repositories and file stores.
//!
//! Rules run before any SQL statement or file write. A failure surfaces as
//! `CoreError::Validation` naming the offending field.

use chrono::NaiveDate;

use crate::errors::CoreError;

/// Inclusive bounds for a feature's business value.
pub const BUSINESS_VALUE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Reject empty or whitespace-only text.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `value` is blank.
pub fn non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Minimal shape check: `local@domain` with both parts present.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the address has no `@` or an empty side.
pub fn email(value: &str) -> Result<(), CoreError> {
    match value.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "email '{value}' is not a valid address"
        ))),
    }
}

/// # Errors
///
/// Returns `CoreError::Validation` if `value` is outside [`BUSINESS_VALUE_RANGE`].
pub fn business_value(value: u8) -> Result<(), CoreError> {
    if BUSINESS_VALUE_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "business_value {value} must be between {} and {}",
            BUSINESS_VALUE_RANGE.start(),
            BUSINESS_VALUE_RANGE.end()
        )))
    }
}

/// A sprint may be a single day but never ends before it starts.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `end` precedes `start`.
pub fn sprint_dates(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::Validation(format!(
            "sprint end_date {end} is before start_date {start}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(non_blank("name", "  ").is_err());
        assert!(non_blank("name", "").is_err());
        assert!(non_blank("name", "Ada").is_ok());
    }

    #[test]
    fn blank_error_names_the_field() {
        let err = non_blank("title", "").unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn email_needs_both_sides() {
        assert!(email("ada@example.com").is_ok());
        assert!(email("ada").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("ada@").is_err());
    }

    #[test]
    fn business_value_bounds() {
        assert!(business_value(0).is_err());
        assert!(business_value(1).is_ok());
        assert!(business_value(10).is_ok());
        assert!(business_value(11).is_err());
    }

    #[test]
    fn sprint_may_last_one_day() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert!(sprint_dates(day, day).is_ok());
        assert!(sprint_dates(day, day.pred_opt().unwrap()).is_err());
    }
}
