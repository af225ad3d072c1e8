//! Uploaded file model.

use super::validation::{FieldError, FieldErrorKind};

/// Default upper bound on upload size: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A file received from a client, held in memory until stored.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Validate size limits. Empty files are rejected.
    pub fn new(
        file_name: Option<&str>,
        content_type: Option<String>,
        bytes: Vec<u8>,
        max_bytes: usize,
    ) -> Result<Self, FieldError> {
        if bytes.is_empty() {
            return Err(FieldError::new(
                "file",
                FieldErrorKind::Empty,
                "file must not be empty",
            ));
        }
        if bytes.len() > max_bytes {
            return Err(FieldError::new(
                "file",
                FieldErrorKind::TooLong,
                format!("file exceeds the {max_bytes} byte limit"),
            ));
        }
        let file_name = file_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("upload")
            .to_owned();
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Where a stored file can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub url: String,
}
