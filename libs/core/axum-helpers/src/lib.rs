//! # Axum Helpers
//!
//! Shared HTTP plumbing for the shop services.
//!
//! - **[`errors`]**: [`AppError`] and the JSON error envelope every handler returns
//! - **[`extractors`]**: [`UuidPath`] and [`ValidatedJson`]
//! - **[`auth`]**: HS256 token issuing and the bearer-token guard
//! - **[`http`]**: CORS policy and security headers
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{JwtAuth, JwtClaims, JwtConfig, JwtError, jwt_auth_middleware};
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use http::{CorsConfig, security_headers};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};
