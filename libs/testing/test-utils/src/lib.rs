//! Shared test infrastructure for the domain crates.
//!
//! - [`TestDatabase`]: a throwaway PostgreSQL container with every migration applied
//! - [`TestDataBuilder`]: deterministic, per-test unique titles, slugs and emails
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn creates_product() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("creates_product");
//!     let title = data.title("mug");
//! }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Derives unique-but-reproducible values from a test name so tests sharing
/// one database never collide on unique columns.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `"Test <label> <seed>"`
    pub fn title(&self, label: &str) -> String {
        format!("Test {} {}", label, self.seed)
    }

    /// `"test-<label>-<seed>"`
    pub fn slug(&self, label: &str) -> String {
        format!("test-{}-{}", label, self.seed)
    }

    pub fn email(&self, label: &str) -> String {
        format!("{}+{}@test.shop.dev", label, self.seed)
    }
}
