//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the shop API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "Product catalog, accounts and product images",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::handlers::ApiDoc),
        (path = "/api/auth", api = domain_auth::handlers::ApiDoc),
        (path = "/api/files", api = domain_files::handlers::ApiDoc),
        (path = "/api/seed", api = crate::api::seed::ApiDoc)
    )
)]
pub struct ApiDoc;
