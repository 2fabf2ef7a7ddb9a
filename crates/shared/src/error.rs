//! Application-wide error types.
//!
//! Every kind maps to a distinct HTTP status and a stable machine-readable code so that
//! clients can branch on the code instead of the message text.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or out-of-range input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A lookup name is already taken in its table.
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// A forecast with the same client, unit, work type and date exists.
    #[error("Duplicate forecast: {0}")]
    DuplicateForecast(String),

    /// A foreign key does not resolve.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Delete blocked by dependent rows.
    #[error("Referenced by child rows: {0}")]
    ReferencedByChild(String),

    /// The store is unreachable or too slow.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::DuplicateName(_) | Self::DuplicateForecast(_) | Self::ReferencedByChild(_) => {
                409
            }
            Self::InvalidReference(_) => 422,
            Self::Unavailable(_) => 503,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateName(_) => "DUPLICATE_NAME",
            Self::DuplicateForecast(_) => "DUPLICATE_FORECAST",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::ReferencedByChild(_) => "REFERENCED_BY_CHILD",
            Self::Unavailable(_) => "UNAVAILABLE",
            Self::Database(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the detail text without the kind prefix.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::DuplicateName(msg)
            | Self::DuplicateForecast(msg)
            | Self::InvalidReference(msg)
            | Self::ReferencedByChild(msg)
            | Self::Unavailable(msg)
            | Self::Database(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
    #[case(AppError::DuplicateName(String::new()), 409, "DUPLICATE_NAME")]
    #[case(AppError::DuplicateForecast(String::new()), 409, "DUPLICATE_FORECAST")]
    #[case(AppError::InvalidReference(String::new()), 422, "INVALID_REFERENCE")]
    #[case(AppError::ReferencedByChild(String::new()), 409, "REFERENCED_BY_CHILD")]
    #[case(AppError::Unavailable(String::new()), 503, "UNAVAILABLE")]
    #[case(AppError::Database(String::new()), 500, "INTERNAL_ERROR")]
    #[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR")]
    fn test_status_and_code(#[case] error: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(error.status_code(), status);
        assert_eq!(error.error_code(), code);
    }

    #[test]
    fn test_domain_kinds_have_distinct_codes() {
        let codes = [
            AppError::DuplicateName(String::new()).error_code(),
            AppError::DuplicateForecast(String::new()).error_code(),
            AppError::InvalidReference(String::new()).error_code(),
            AppError::ReferencedByChild(String::new()).error_code(),
            AppError::NotFound(String::new()).error_code(),
            AppError::Validation(String::new()).error_code(),
            AppError::Unavailable(String::new()).error_code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::DuplicateName("msg".into()).to_string(),
            "Duplicate name: msg"
        );
        assert_eq!(
            AppError::ReferencedByChild("msg".into()).to_string(),
            "Referenced by child rows: msg"
        );
        assert_eq!(AppError::Unavailable("msg".into()).detail(), "msg");
    }
}
