//! Auth Domain
//!
//! Email and password accounts with HS256 bearer tokens.
//!
//! ```text
//! handlers ──► AuthService ──► UserRepository (Postgres, in-memory)
//!                  │
//!                  ├──► CredentialHasher (argon2)
//!                  └──► JwtAuth
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_auth::{AuthService, InMemoryUserRepository, handlers};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-development-secret-of-32-chars!").unwrap());
//! let service = AuthService::new(InMemoryUserRepository::new(), jwt);
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{AuthError, AuthResult};
pub use models::{AuthResponse, LoginRequest, SignupRequest, User, UserResponse};
pub use password::{Argon2Hasher, CredentialHasher};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::AuthService;
