//! API routes module

pub mod health;
pub mod seed;

use axum::Router;
use domain_auth::{AuthService, PgUserRepository};
use domain_products::{PgProductRepository, ProductService};

use crate::state::AppState;

/// Create all API routes; the caller nests them under `/api`.
pub fn routes(state: &AppState) -> Router {
    let products = ProductService::new(PgProductRepository::new(state.db.clone()));
    let auth = AuthService::new(
        PgUserRepository::new(state.db.clone()),
        axum_helpers::JwtAuth::new(&state.config.jwt),
    );

    Router::new()
        .nest("/products", domain_products::handlers::router(products.clone()))
        .nest("/seed", seed::router(products))
        .nest("/auth", domain_auth::handlers::router(auth))
        .nest("/files", domain_files::handlers::router(state.config.files.clone()))
        .merge(health::router(state.clone()))
}
