//! Store error kinds and translation from low-level database errors.

use std::future::Future;
use std::time::Duration;

use sea_orm::{DbErr, SqlErr};
use workcast_core::ValidationError;
use workcast_core::reconcile::FailureCode;
use workcast_shared::AppError;

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A lookup name is already taken.
    #[error("{0}")]
    DuplicateName(String),

    /// A forecast with the same identity tuple exists.
    #[error("{0}")]
    DuplicateForecast(String),

    /// A foreign key does not resolve.
    #[error("{0}")]
    InvalidReference(String),

    /// Delete rejected because child rows reference the row.
    #[error("{0}")]
    ReferencedByChild(String),

    /// Row does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Human-readable kind, e.g. "business unit".
        entity: &'static str,
        /// Requested id.
        id: i32,
    },

    /// Input rejected before reaching the database.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Connection failure or elapsed deadline.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// Any other database error.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl StoreError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "DUPLICATE_NAME",
            Self::DuplicateForecast(_) => "DUPLICATE_FORECAST",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::ReferencedByChild(_) => "REFERENCED_BY_CHILD",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unavailable(_) => "UNAVAILABLE",
            Self::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Unavailable(err.to_string()),
            other => Self::Database(other),
        }
    }
}

impl FailureCode for StoreError {
    fn failure_code(&self) -> &'static str {
        self.error_code()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::DuplicateName(_) => Self::DuplicateName(message),
            StoreError::DuplicateForecast(_) => Self::DuplicateForecast(message),
            StoreError::InvalidReference(_) => Self::InvalidReference(message),
            StoreError::ReferencedByChild(_) => Self::ReferencedByChild(message),
            StoreError::NotFound { .. } => Self::NotFound(message),
            StoreError::Validation(_) => Self::Validation(message),
            StoreError::Unavailable(_) => Self::Unavailable(message),
            StoreError::Database(_) => Self::Database(message),
        }
    }
}

/// Translates an insert or update failure.
///
/// Unique violations become `unique()`, foreign key violations become
/// `foreign()`, everything else goes through `From<DbErr>`.
pub(crate) fn write_error(
    err: DbErr,
    unique: impl FnOnce() -> StoreError,
    foreign: impl FnOnce() -> StoreError,
) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => unique(),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => foreign(),
        _ => err.into(),
    }
}

/// Translates a delete failure. A foreign key violation means child rows
/// still point at the row.
pub(crate) fn delete_error(err: DbErr, referenced: impl FnOnce() -> StoreError) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => referenced(),
        _ => err.into(),
    }
}

/// Runs a store call under a deadline. An elapsed deadline is `Unavailable`.
pub(crate) async fn within<T, F>(deadline: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| StoreError::Unavailable(format!("store call exceeded {deadline:?}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sea_orm::RuntimeErr;

    #[rstest]
    #[case(StoreError::DuplicateName("x".into()), 409, "DUPLICATE_NAME")]
    #[case(StoreError::DuplicateForecast("x".into()), 409, "DUPLICATE_FORECAST")]
    #[case(StoreError::InvalidReference("x".into()), 422, "INVALID_REFERENCE")]
    #[case(StoreError::ReferencedByChild("x".into()), 409, "REFERENCED_BY_CHILD")]
    #[case(StoreError::NotFound { entity: "client", id: 4 }, 404, "NOT_FOUND")]
    #[case(StoreError::Validation(ValidationError::NegativeAmount(-1)), 400, "VALIDATION_ERROR")]
    #[case(StoreError::Unavailable("down".into()), 503, "UNAVAILABLE")]
    #[case(StoreError::Database(DbErr::Custom("boom".into())), 500, "INTERNAL_ERROR")]
    fn test_store_error_maps_to_app_error(
        #[case] err: StoreError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        assert_eq!(err.error_code(), code);
        let app: AppError = err.into();
        assert_eq!(app.status_code(), status);
        assert_eq!(app.error_code(), code);
    }

    #[test]
    fn test_connection_errors_are_unavailable() {
        let err: StoreError = DbErr::Conn(RuntimeErr::Internal("refused".into())).into();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_not_found_message() {
        let err = StoreError::NotFound {
            entity: "business unit",
            id: 7,
        };
        assert_eq!(err.to_string(), "business unit 7 not found");
    }

    #[test]
    fn test_other_errors_fall_through_write_translation() {
        let err = write_error(
            DbErr::Custom("boom".into()),
            || StoreError::DuplicateName("dup".into()),
            || StoreError::InvalidReference("fk".into()),
        );
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn test_within_elapsed_deadline_is_unavailable() {
        let result: Result<(), StoreError> = within(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_within_passes_through_result() {
        let result = within(Duration::from_secs(1), async { Ok::<_, StoreError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }
}
