//! Handler tests for the Files domain: multipart upload into a temp
//! directory, then download by the returned name.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::ErrorResponse;
use domain_files::{FilesConfig, UploadResponse, handlers};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt; // For oneshot()

const BOUNDARY: &str = "shop-test-boundary";

fn app(dir: &TempDir) -> Router {
    handlers::router(FilesConfig::new(dir.path(), "http://localhost:8080/api"))
}

fn multipart(field: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"photo\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/product")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn error_body(body: Body) -> ErrorResponse {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_upload_png_then_download() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let png = b"\x89PNG\r\n\x1a\nfake";

    let response = app
        .clone()
        .oneshot(multipart("file", "image/png", png))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let uploaded: UploadResponse = serde_json::from_slice(&bytes).unwrap();

    let prefix = "http://localhost:8080/api/files/product/";
    assert!(uploaded.secure_url.starts_with(prefix));
    let image_name = uploaded.secure_url.trim_start_matches(prefix).to_string();
    assert!(image_name.ends_with(".png"));
    assert!(dir.path().join(&image_name).exists());

    let request = Request::builder()
        .uri(format!("/product/{image_name}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let downloaded = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&downloaded[..], png);
}

#[tokio::test]
async fn test_upload_gif_is_rejected() {
    let dir = TempDir::new().unwrap();

    let response = app(&dir)
        .oneshot(multipart("file", "image/gif", b"GIF89a"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = error_body(response.into_body()).await;
    assert_eq!(error.message, "Make sure that the file is an image");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_without_file_field_is_empty() {
    let dir = TempDir::new().unwrap();

    let response = app(&dir)
        .oneshot(multipart("avatar", "image/png", b"data"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = error_body(response.into_body()).await;
    assert_eq!(error.message, "File is empty");
}

#[tokio::test]
async fn test_download_unknown_image() {
    let dir = TempDir::new().unwrap();
    let request = Request::builder()
        .uri("/product/missing.png")
        .body(Body::empty())
        .unwrap();

    let response = app(&dir).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = error_body(response.into_body()).await;
    assert_eq!(error.message, "No product found with image missing.png");
}

#[tokio::test]
async fn test_download_rejects_traversal() {
    let dir = TempDir::new().unwrap();
    let request = Request::builder()
        .uri("/product/..%2Fsecret.png")
        .body(Body::empty())
        .unwrap();

    let response = app(&dir).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = error_body(response.into_body()).await;
    assert!(error.message.starts_with("Invalid image name"));
}
