use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{CorsConfig, security_headers};
use axum::{Router, http::StatusCode, middleware};
use core_config::ServerConfig;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

/// Wraps the domain routers with documentation UIs and the shared middleware stack.
///
/// - `apis` is nested under `/api` (state must already be applied)
/// - OpenAPI UIs at `/swagger-ui`, `/redoc`, `/rapidoc` and `/scalar`
/// - JSON 404 fallback
/// - request tracing, timeout, security headers, CORS and compression
pub fn create_router<T>(apis: Router, server: &ServerConfig, cors: &CorsConfig) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server.request_timeout,
        ))
        .layer(middleware::from_fn(security_headers))
        .layer(cors.layer())
        .layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` bounded by the
/// configured shutdown timeout.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!(address = %listener.local_addr()?, "Server listening");

    let signal_watcher = coordinator.clone();
    tokio::spawn(async move { signal_watcher.wait_for_signal().await });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinator.clone().shutdown_requested())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server error"));

    let timeout = server_config.shutdown_timeout;
    info!(?timeout, "Running cleanup");
    if tokio::time::timeout(timeout, cleanup).await.is_err() {
        tracing::warn!(?timeout, "Cleanup exceeded timeout, forcing shutdown");
    }

    serve_result
}
