//! Products Domain
//!
//! Product catalog with images, backed by PostgreSQL through Sea-ORM.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, lookup by term, transactional update
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← ProductRepository + ProductTransaction (Postgres, in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, ProductImage, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     repository::InMemoryProductRepository,
//!     service::ProductService,
//! };
//!
//! let repository = InMemoryProductRepository::new();
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod seed;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{
    CreateProduct, Gender, PaginationQuery, Product, ProductImage, ProductResponse,
    UpdateProduct, normalize_slug,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository, ProductTransaction};
pub use service::ProductService;
