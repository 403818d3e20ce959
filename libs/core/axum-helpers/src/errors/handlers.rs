use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Router fallback producing the standard JSON envelope.
pub async fn not_found(uri: Uri) -> Response {
    let body = Json(ErrorResponse::new(
        ErrorCode::NotFound,
        format!("No route for {}", uri.path()),
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}
