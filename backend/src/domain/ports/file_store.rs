//! Port for external object storage.
use async_trait::async_trait;

use crate::domain::{StoredFile, UploadedFile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by file store adapters.
    pub enum FileStoreError {
        /// The store could not be reached.
        Unavailable { message: String } => "file store unavailable: {message}",
        /// The store refused the upload.
        Rejected { status: u16, message: String } =>
            "file store rejected upload ({status}): {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist `file` and return its public location.
    async fn store(&self, file: &UploadedFile) -> Result<StoredFile, FileStoreError>;
}
