//! Stateless bearer-token authentication.
//!
//! [`JwtAuth`] signs HS256 tokens whose payload is the user's email, and
//! [`jwt_auth_middleware`] guards routes by verifying the `Authorization:
//! Bearer` header and inserting the decoded [`JwtClaims`] into request
//! extensions.
//!
//! ```ignore
//! let jwt = JwtAuth::new(&JwtConfig::from_env()?);
//! let private = Router::new()
//!     .route("/check-status", get(check_status))
//!     .route_layer(axum::middleware::from_fn_with_state(jwt.clone(), jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, JwtError};
pub use middleware::jwt_auth_middleware;
