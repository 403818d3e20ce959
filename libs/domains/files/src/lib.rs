//! Files Domain
//!
//! Product image uploads stored on local disk.
//!
//! - [`filter::file_filter`]: accepts png, jpg and jpeg uploads by MIME subtype
//! - [`namer::file_namer`]: `<uuid>.<subtype>` storage names
//! - [`handlers::router`]: `POST /product` and `GET /product/{image_name}`

pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod namer;

pub use config::FilesConfig;
pub use error::{FileError, FileResult};
pub use filter::{UploadedFile, file_filter};
pub use handlers::UploadResponse;
pub use namer::file_namer;
