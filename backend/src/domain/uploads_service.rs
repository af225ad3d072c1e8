//! File upload service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{FileStore, FileStoreError, FileUploadCommand};
use crate::domain::{Error, StoredFile, UploadedFile};

/// Implements [`FileUploadCommand`] over a [`FileStore`].
#[derive(Clone)]
pub struct UploadsService<F> {
    store: Arc<F>,
}

impl<F> UploadsService<F> {
    pub fn new(store: Arc<F>) -> Self {
        Self { store }
    }
}

fn map_store_error(error: FileStoreError) -> Error {
    match error {
        FileStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("file store unavailable: {message}"))
        }
        FileStoreError::Rejected { status, message } => {
            Error::internal(format!("file store rejected upload ({status}): {message}"))
        }
    }
}

#[async_trait]
impl<F: FileStore> FileUploadCommand for UploadsService<F> {
    async fn upload(&self, file: UploadedFile) -> Result<StoredFile, Error> {
        let stored = self.store.store(&file).await.map_err(map_store_error)?;
        info!(file_name = %file.file_name, bytes = file.bytes.len(), "stored upload");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockFileStore;
    use rstest::rstest;

    fn file() -> UploadedFile {
        UploadedFile::new(Some("essay.pdf"), None, vec![1, 2, 3], 10).expect("file")
    }

    #[tokio::test]
    async fn returns_the_store_url() {
        let mut store = MockFileStore::new();
        store.expect_store().return_once(|_| {
            Ok(StoredFile {
                url: "https://cdn.example/essay.pdf".to_owned(),
            })
        });

        let stored = UploadsService::new(Arc::new(store))
            .upload(file())
            .await
            .expect("stored");
        assert_eq!(stored.url, "https://cdn.example/essay.pdf");
    }

    #[rstest]
    #[case(FileStoreError::unavailable("timeout"), ErrorCode::ServiceUnavailable)]
    #[case(FileStoreError::rejected(401_u16, "bad signature"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn maps_store_failures(#[case] failure: FileStoreError, #[case] expected: ErrorCode) {
        let mut store = MockFileStore::new();
        store.expect_store().return_once(move |_| Err(failure));

        let err = UploadsService::new(Arc::new(store))
            .upload(file())
            .await
            .expect_err("failed");
        assert_eq!(err.code(), expected);
    }
}
