//! Demo catalog loader

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::errors::responses::InternalServerErrorResponse;
use domain_products::{ProductRepository, ProductResult, ProductService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

#[derive(OpenApi)]
#[openapi(
    paths(run_seed),
    components(schemas(SeedResponse), responses(InternalServerErrorResponse)),
    tags((name = "Seed", description = "Development data"))
)]
pub struct ApiDoc;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    pub message: String,
    pub inserted: usize,
}

pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(run_seed))
        .with_state(Arc::new(service))
}

/// Replace the catalog with the demo products
#[utoipa::path(
    get,
    path = "",
    tag = "Seed",
    responses(
        (status = 200, description = "Catalog reloaded", body = SeedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn run_seed<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<SeedResponse>> {
    let inserted = service.seed_catalog().await?;
    tracing::info!(inserted, "Seed executed");

    Ok(Json(SeedResponse {
        message: "Seed executed".to_string(),
        inserted,
    }))
}
