//! Cross-cutting HTTP middleware: CORS policy and response security headers.

pub mod cors;
pub mod security;

pub use cors::CorsConfig;
pub use security::security_headers;
