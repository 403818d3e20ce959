//! PostgreSQL plumbing shared by the shop services.
//!
//! Connection pooling and retry, migrations, readiness probing, and the
//! classification of `DbErr` values that repositories need when mapping store
//! failures onto their domain errors.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "shop-api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, unique_violation_detail};
