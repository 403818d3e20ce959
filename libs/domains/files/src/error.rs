use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File is empty")]
    Empty,

    #[error("Make sure that the file is an image")]
    Rejected,

    #[error("No product found with image {0}")]
    NotFound(String),

    #[error("Invalid image name: {0}")]
    InvalidName(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FileResult<T> = Result<T, FileError>;

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::Empty | FileError::Rejected => AppError::InvalidFile(err.to_string()),
            FileError::NotFound(_) | FileError::InvalidName(_) | FileError::Multipart(_) => {
                AppError::BadRequest(err.to_string())
            }
            FileError::Io(e) => AppError::internal(e),
        }
    }
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
