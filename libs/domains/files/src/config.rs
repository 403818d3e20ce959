use core_config::{ConfigError, FromEnv, env_or_default};
use std::path::{Path, PathBuf};

use crate::error::{FileError, FileResult};

/// Where uploads are written and how their public URLs are built.
#[derive(Clone, Debug)]
pub struct FilesConfig {
    pub upload_dir: PathBuf,
    /// Public base of the API, without a trailing slash
    pub host_api: String,
}

impl FilesConfig {
    pub fn new(upload_dir: impl Into<PathBuf>, host_api: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            host_api: host_api.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn secure_url(&self, image_name: &str) -> String {
        format!("{}/files/product/{}", self.host_api, image_name)
    }

    /// Path of a stored image. Names that could escape the upload
    /// directory are refused.
    pub fn image_path(&self, image_name: &str) -> FileResult<PathBuf> {
        let is_plain = !image_name.is_empty()
            && !image_name.contains(['/', '\\'])
            && !image_name.contains("..")
            && Path::new(image_name).file_name().is_some();

        if !is_plain {
            return Err(FileError::InvalidName(image_name.to_string()));
        }
        Ok(self.upload_dir.join(image_name))
    }
}

impl FromEnv for FilesConfig {
    /// - `UPLOAD_DIR`: defaults to ./static/products
    /// - `HOST_API`: defaults to http://localhost:8080/api
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            env_or_default("UPLOAD_DIR", "./static/products"),
            env_or_default("HOST_API", "http://localhost:8080/api"),
        ))
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self::new("./static/products", "http://localhost:8080/api")
    }
}
