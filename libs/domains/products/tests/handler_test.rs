//! Handler tests for the Products domain
//!
//! These drive the router with `oneshot` against the in-memory repository:
//! - request deserialization and validation
//! - status codes and the error envelope
//! - image replacement through PATCH

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create(app: &Router, body: Value) -> ProductResponse {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

fn blue_mug() -> Value {
    json!({
        "title": "Blue Mug",
        "slug": "blue-mug",
        "price": 12.0,
        "gender": "unisex",
        "images": ["mug-1.jpg", "mug-2.jpg"]
    })
}

#[tokio::test]
async fn test_create_product_returns_201_with_flat_images() {
    let app = app();

    let product = create(&app, blue_mug()).await;

    assert_eq!(product.title, "Blue Mug");
    assert_eq!(product.slug, "blue-mug");
    assert_eq!(product.stock, 0);
    assert_eq!(product.images, vec!["mug-1.jpg", "mug-2.jpg"]);
}

#[tokio::test]
async fn test_create_product_validates_input() {
    let request = json_request(
        "POST",
        "/",
        json!({ "title": "", "gender": "men", "price": -3.0 }),
    );

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_duplicate_title_is_bad_request_with_detail() {
    let app = app();
    create(&app, blue_mug()).await;

    let response = app
        .oneshot(json_request("POST", "/", blue_mug()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert!(error.message.contains("already exists"));
}

#[tokio::test]
async fn test_find_by_title_slug_and_id() {
    let app = app();
    let created = create(&app, blue_mug()).await;

    let id = created.id.to_string();

    for term in ["BLUE%20MUG", "blue-mug", id.as_str()] {
        let request = Request::builder()
            .uri(format!("/{term}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "term {term}");
        let found: ProductResponse = json_body(response.into_body()).await;
        assert_eq!(found.id, created.id);
    }
}

#[tokio::test]
async fn test_find_unknown_term_returns_404() {
    let request = Request::builder()
        .uri("/green-mug")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Product with term 'green-mug' not found");
}

#[tokio::test]
async fn test_list_is_ordered_by_title_and_paginated() {
    let app = app();
    for title in ["Cap", "Apron", "Boots"] {
        create(&app, json!({ "title": title, "gender": "kid" })).await;
    }

    let request = Request::builder()
        .uri("/?limit=2&offset=0")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: Vec<ProductResponse> = json_body(response.into_body()).await;
    let titles: Vec<&str> = page.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Apron", "Boots"]);
}

#[tokio::test]
async fn test_patch_with_empty_images_clears_them() {
    let app = app();
    let created = create(&app, blue_mug()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", created.id),
            json!({ "images": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: ProductResponse = json_body(response.into_body()).await;
    assert!(updated.images.is_empty());
}

#[tokio::test]
async fn test_patch_without_images_keeps_them() {
    let app = app();
    let created = create(&app, blue_mug()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", created.id),
            json!({ "title": "Navy Mug", "stock": 4 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: ProductResponse = json_body(response.into_body()).await;
    assert_eq!(updated.title, "Navy Mug");
    assert_eq!(updated.slug, "blue-mug");
    assert_eq!(updated.stock, 4);
    assert_eq!(updated.images, vec!["mug-1.jpg", "mug-2.jpg"]);
}

#[tokio::test]
async fn test_patch_rejects_non_uuid_id() {
    let response = app()
        .oneshot(json_request("PATCH", "/blue-mug", json!({ "stock": 1 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "INVALID_UUID");
}

#[tokio::test]
async fn test_patch_unknown_product_returns_404() {
    let response = app()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", uuid::Uuid::now_v7()),
            json!({ "stock": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Product not found");
}

#[tokio::test]
async fn test_delete_returns_204_then_404() {
    let app = app();
    let created = create(&app, blue_mug()).await;
    let uri = format!("/{}", created.id);

    let delete = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let get = Request::builder().uri(&uri).body(Body::empty()).unwrap();
    let response = app.oneshot(get).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
