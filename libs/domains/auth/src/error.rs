use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, JwtError};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unique constraint violation, carrying the store's detail text
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl From<DbErr> for AuthError {
    fn from(err: DbErr) -> Self {
        match database::unique_violation_detail(&err) {
            Some(detail) => AuthError::Conflict(detail),
            None => AuthError::Database(err.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Conflict(detail) => AppError::BadRequest(detail),
            AuthError::Unauthorized(msg) => AppError::Unauthorized(msg),
            AuthError::Validation(msg) => AppError::BadRequest(msg),
            AuthError::Token(e) => AppError::internal(e),
            AuthError::PasswordHash(msg)
            | AuthError::Database(msg)
            | AuthError::Internal(msg) => AppError::internal(msg),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthError::Conflict("dup".into()), StatusCode::BAD_REQUEST),
            (AuthError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (AuthError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AuthError::PasswordHash("salt".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AuthError::Token(JwtError::Encode("key".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AuthError::Database("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
