use uuid::Uuid;

use crate::filter::UploadedFile;

/// Random storage name keeping the MIME subtype as extension: `<uuid>.<subtype>`.
pub fn file_namer(file: &UploadedFile) -> String {
    let extension = file.subtype().unwrap_or("bin");
    format!("{}.{}", Uuid::new_v4(), extension)
}
