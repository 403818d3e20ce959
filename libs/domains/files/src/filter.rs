use crate::error::FileError;

/// MIME subtypes accepted for product images
pub const VALID_EXTENSIONS: [&str; 3] = ["jpg", "png", "jpeg"];

/// A file received from a multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    /// Declared MIME type, e.g. `image/png`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Part of the content type after `/`, if any.
    pub fn subtype(&self) -> Option<&str> {
        self.content_type.split('/').nth(1)
    }
}

/// Accepts png, jpg and jpeg by declared MIME subtype.
///
/// A missing file is an error rather than a rejection.
pub fn file_filter(file: Option<&UploadedFile>) -> Result<bool, FileError> {
    let file = file.ok_or(FileError::Empty)?;

    Ok(file
        .subtype()
        .is_some_and(|subtype| VALID_EXTENSIONS.contains(&subtype)))
}
