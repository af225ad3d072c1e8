//! Driving port for file uploads.
use async_trait::async_trait;

use crate::domain::{Error, StoredFile, UploadedFile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileUploadCommand: Send + Sync {
    /// Push `file` to external storage and return its URL.
    async fn upload(&self, file: UploadedFile) -> Result<StoredFile, Error>;
}
