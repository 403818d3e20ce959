//! Request extractors that reject bad input with the shared error envelope.
//!
//! `ValidatedJson` runs `validator` rules after deserializing; `UuidPath`
//! turns a malformed id segment into a 400 `INVALID_UUID`.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
