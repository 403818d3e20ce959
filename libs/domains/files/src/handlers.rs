//! HTTP handlers for product image upload and download

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::config::FilesConfig;
use crate::error::{FileError, FileResult};
use crate::filter::{UploadedFile, file_filter};
use crate::namer::file_namer;

/// Multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

/// OpenAPI documentation for Files API
#[derive(OpenApi)]
#[openapi(
    paths(upload_product_image, find_product_image),
    components(
        schemas(UploadForm, UploadResponse),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Files", description = "Product image storage")
    )
)]
pub struct ApiDoc;

/// Multipart body of an upload, documentation only
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[schema(example = "http://localhost:8080/api/files/product/0b6f6c1e-4a8e-4d8a-9f4b-5c1f3a2e9d10.png")]
    pub secure_url: String,
}

pub fn router(config: FilesConfig) -> Router {
    Router::new()
        .route("/product", post(upload_product_image))
        .route("/product/{image_name}", get(find_product_image))
        .with_state(Arc::new(config))
}

/// First `file` field of the body, if present.
async fn read_file_field(multipart: &mut Multipart) -> FileResult<Option<UploadedFile>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FileError::Multipart(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| FileError::Multipart(e.body_text()))?;

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

fn image_content_type(image_name: &str) -> &'static str {
    match image_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Upload a product image
#[utoipa::path(
    post,
    path = "/product",
    tag = "Files",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_product_image(
    State(config): State<Arc<FilesConfig>>,
    mut multipart: Multipart,
) -> FileResult<impl IntoResponse> {
    let file = read_file_field(&mut multipart).await?;

    if !file_filter(file.as_ref())? {
        return Err(FileError::Rejected);
    }
    let file = file.ok_or(FileError::Empty)?;

    let image_name = file_namer(&file);
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tokio::fs::write(config.upload_dir.join(&image_name), &file.bytes).await?;

    tracing::info!(
        image_name = %image_name,
        uploaded_as = %file.file_name,
        size = file.bytes.len(),
        "Stored product image"
    );

    let body = UploadResponse {
        secure_url: config.secure_url(&image_name),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// Download a stored product image
#[utoipa::path(
    get,
    path = "/product/{image_name}",
    tag = "Files",
    params(
        ("image_name" = String, Path, description = "Name returned by the upload")
    ),
    responses(
        (status = 200, description = "Image bytes with an image content type"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_product_image(
    State(config): State<Arc<FilesConfig>>,
    Path(image_name): Path<String>,
) -> FileResult<Response> {
    let path = config.image_path(&image_name)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(FileError::NotFound(image_name));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(([(header::CONTENT_TYPE, image_content_type(&image_name))], bytes).into_response())
}
