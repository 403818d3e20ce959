//! UUID path parameter extractor.

use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    Json,
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Parses the single path parameter as a UUID, answering 400 with
/// `INVALID_UUID` otherwise.
///
/// ```ignore
/// async fn update(UuidPath(id): UuidPath) -> String { id.to_string() }
/// let app = Router::new().route("/products/{id}", patch(update));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Uuid::parse_str(&raw).map(UuidPath).map_err(|_| {
            let body = ErrorResponse::new(ErrorCode::InvalidUuid, format!("Invalid UUID: {raw}"));
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        })
    }
}
