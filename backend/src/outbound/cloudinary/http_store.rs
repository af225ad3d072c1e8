//! Reqwest-backed Cloudinary store using signed multipart uploads.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::ports::{FileStore, FileStoreError};
use crate::domain::{StoredFile, UploadedFile};

use super::signature::sign;

const API_BASE: &str = "https://api.cloudinary.com/v1_1/";

/// Account credentials and destination folder.
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Zeroizing<String>,
    pub folder: Option<String>,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("folder", &self.folder)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

pub struct CloudinaryFileStore {
    client: Client,
    endpoint: Url,
    config: CloudinaryConfig,
    clock: Arc<dyn Clock>,
}

impl CloudinaryFileStore {
    /// # Errors
    ///
    /// Fails when the upload URL cannot be built from the cloud name or the
    /// reqwest client cannot be constructed.
    pub fn new(config: CloudinaryConfig, clock: Arc<dyn Clock>) -> Result<Self, FileStoreError> {
        let endpoint = Url::parse(&format!("{API_BASE}{}/auto/upload", config.cloud_name))
            .map_err(|error| FileStoreError::unavailable(format!("invalid cloud name: {error}")))?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| FileStoreError::unavailable(error.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            config,
            clock,
        })
    }

    /// Signed parameters for an upload made at the current time.
    fn signed_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("timestamp", self.clock.utc().timestamp().to_string())];
        if let Some(folder) = self.config.folder.as_ref().filter(|f| !f.is_empty()) {
            params.push(("folder", folder.clone()));
        }
        let signature = sign(&params, &self.config.api_secret);
        params.push(("signature", signature));
        params.push(("signature_algorithm", "sha256".to_owned()));
        params.push(("api_key", self.config.api_key.clone()));
        params
    }

    fn form_for(&self, file: &UploadedFile) -> Result<Form, FileStoreError> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|error| FileStoreError::rejected(400_u16, error.to_string()))?;
        }
        Ok(self
            .signed_params()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part("file", part))
    }
}

fn map_transport_error(error: &reqwest::Error) -> FileStoreError {
    FileStoreError::unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &str) -> FileStoreError {
    let message = format!("status {}: {}", status.as_u16(), body.trim());
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        FileStoreError::unavailable(message)
    } else {
        FileStoreError::rejected(status.as_u16(), message)
    }
}

#[async_trait]
impl FileStore for CloudinaryFileStore {
    async fn store(&self, file: &UploadedFile) -> Result<StoredFile, FileStoreError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(self.form_for(file)?)
            .send()
            .await
            .map_err(|error| map_transport_error(&error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|error| FileStoreError::rejected(status.as_u16(), error.to_string()))?;
        Ok(StoredFile {
            url: body.secure_url,
        })
    }
}
