use sea_orm::sqlx::postgres::PgDatabaseError;
use sea_orm::{DbErr, RuntimeErr, SqlErr};

/// Errors raised by the connection and health helpers in this crate.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] DbErr),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Returns the store's detail when `err` is a unique-constraint violation
/// (SQLSTATE 23505), e.g. `Key (slug)=(blue_mug) already exists.`, and `None`
/// for every other failure.
///
/// Falls back to the primary message when the server sent no detail.
/// Repositories use this to turn duplicate titles, slugs or emails into
/// client errors instead of opaque server errors.
pub fn unique_violation_detail(err: &DbErr) -> Option<String> {
    let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() else {
        return None;
    };
    Some(postgres_detail(err).unwrap_or(message))
}

/// `DETAIL` field of a Postgres error response, if any.
fn postgres_detail(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()?
            .try_downcast_ref::<PgDatabaseError>()?
            .detail()
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_errors_are_not_unique_violations() {
        assert_eq!(unique_violation_detail(&DbErr::Custom("boom".into())), None);
        assert_eq!(
            unique_violation_detail(&DbErr::RecordNotFound("product".into())),
            None
        );
        assert_eq!(
            unique_violation_detail(&DbErr::Conn(sea_orm::RuntimeErr::Internal(
                "connection reset".into()
            ))),
            None
        );
    }

    #[test]
    fn test_errors_without_driver_response_have_no_detail() {
        assert_eq!(postgres_detail(&DbErr::Custom("boom".into())), None);
        assert_eq!(
            postgres_detail(&DbErr::Exec(RuntimeErr::Internal("closed".into()))),
            None
        );
    }

    #[test]
    fn test_database_error_display() {
        let err = DatabaseError::HealthCheckFailed("timeout".into());
        assert_eq!(err.to_string(), "Health check failed: timeout");

        let err: DatabaseError = DbErr::Custom("bad".into()).into();
        assert!(err.to_string().starts_with("PostgreSQL error"));
    }
}
