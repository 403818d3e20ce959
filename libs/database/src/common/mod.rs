//! Error classification and retry helpers.

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult, unique_violation_detail};
pub use retry::{RetryConfig, retry, retry_with_backoff};
