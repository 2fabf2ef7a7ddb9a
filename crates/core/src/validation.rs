//! Field-level validation rules.
//!
//! Applied to every draft and change set before it reaches the store.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Width of the name columns.
pub const MAX_NAME_LEN: usize = 255;

/// Validation errors for record input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty after trimming.
    #[error("{field} must not be empty")]
    EmptyName {
        /// Wire name of the offending field.
        field: &'static str,
    },

    /// Name exceeds the column width.
    #[error("{field} must be at most {max} characters")]
    NameTooLong {
        /// Wire name of the offending field.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },

    /// Client end date precedes its start date.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Forecast amount is negative.
    #[error("forecast amount must not be negative, got {0}")]
    NegativeAmount(i32),

    /// Forecast date is not month-aligned.
    #[error("forecast date {0} is not the first day of a month")]
    NotMonthStart(NaiveDate),
}

/// Trims a name and checks it against the column constraints.
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or too long.
pub fn normalize_name(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName { field });
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }
    Ok(name.to_string())
}

/// Normalizes an optional label. Blank labels become `None`.
///
/// # Errors
///
/// Returns an error if the label is too long.
pub fn normalize_label(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<String>, ValidationError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => normalize_name(field, label).map(Some),
    }
}

/// Checks that an optional end date does not precede the start date.
///
/// # Errors
///
/// Returns an error if `end < start`.
pub fn check_date_range(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => Err(ValidationError::EndBeforeStart { start, end }),
        _ => Ok(()),
    }
}

/// Checks that a forecast amount is non-negative.
///
/// # Errors
///
/// Returns an error if the amount is negative.
pub fn check_amount(amount: i32) -> Result<i32, ValidationError> {
    if amount < 0 {
        return Err(ValidationError::NegativeAmount(amount));
    }
    Ok(amount)
}

/// Checks that a forecast date is the first day of its month.
///
/// # Errors
///
/// Returns an error for any other day.
pub fn check_month_start(date: NaiveDate) -> Result<NaiveDate, ValidationError> {
    if date.day() != 1 {
        return Err(ValidationError::NotMonthStart(date));
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(normalize_name("name", "  Acme Corp ").unwrap(), "Acme Corp");
    }

    #[test]
    fn test_normalize_name_rejects_blank() {
        assert_eq!(
            normalize_name("client_name", "   "),
            Err(ValidationError::EmptyName {
                field: "client_name"
            })
        );
    }

    #[test]
    fn test_normalize_name_rejects_long() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            normalize_name("name", &long),
            Err(ValidationError::NameTooLong { max: 255, .. })
        ));
        assert!(normalize_name("name", &"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_normalize_label_blank_is_none() {
        assert_eq!(normalize_label("label", Some("  ".into())).unwrap(), None);
        assert_eq!(normalize_label("label", None).unwrap(), None);
        assert_eq!(
            normalize_label("label", Some(" Q4 ".into())).unwrap(),
            Some("Q4".to_string())
        );
    }

    #[test]
    fn test_date_range() {
        let start = date(2024, 5, 15);
        assert!(check_date_range(start, None).is_ok());
        assert!(check_date_range(start, Some(start)).is_ok());
        assert!(check_date_range(start, Some(date(2025, 1, 1))).is_ok());
        assert_eq!(
            check_date_range(start, Some(date(2024, 5, 14))),
            Err(ValidationError::EndBeforeStart {
                start,
                end: date(2024, 5, 14)
            })
        );
    }

    #[test]
    fn test_amount() {
        assert_eq!(check_amount(0), Ok(0));
        assert_eq!(check_amount(12_000), Ok(12_000));
        assert_eq!(check_amount(-1), Err(ValidationError::NegativeAmount(-1)));
    }

    #[test]
    fn test_month_start() {
        assert!(check_month_start(date(2025, 11, 1)).is_ok());
        assert_eq!(
            check_month_start(date(2025, 11, 15)),
            Err(ValidationError::NotMonthStart(date(2025, 11, 15)))
        );
    }
}
