use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{0}")]
    NotFound(String),

    /// Unique constraint violation, carrying the store's detail text
    #[error("{0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        match database::unique_violation_detail(&err) {
            Some(detail) => ProductError::Conflict(detail),
            None => ProductError::Database(err.to_string()),
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(msg) => AppError::NotFound(msg),
            ProductError::Conflict(detail) => AppError::BadRequest(detail),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) | ProductError::Internal(msg) => AppError::internal(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
