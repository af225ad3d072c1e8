//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LEARNERS_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::inbound::http::session_config::SessionInputs;
use crate::outbound::cloudinary::CloudinaryConfig;
use crate::outbound::firebase::FirebaseVerifierConfig;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const CLOUDINARY_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised when required settings are absent or malformed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("missing required setting {name}")]
    Missing { name: &'static str },
    #[error("setting {name} is not a valid URL: {message}")]
    InvalidUrl { name: &'static str, message: String },
}

/// Startup configuration for the backend binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEARNERS")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Firebase project whose ID tokens are accepted.
    pub firebase_project_id: Option<String>,
    /// Override for the signing key endpoint.
    pub firebase_jwks_url: Option<String>,
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_api_key: Option<String>,
    pub cloudinary_api_secret: Option<String>,
    /// Destination folder for uploaded files.
    pub upload_folder: Option<String>,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: Option<usize>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`. Defaults to true.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy for the session cookie: Strict, Lax or None.
    pub same_site: Option<String>,
}

fn required<'a>(value: Option<&'a String>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(String::as_str)
        .filter(|text| !text.trim().is_empty())
        .ok_or(SettingsError::Missing { name })
}

impl AppSettings {
    /// Return the database URL.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Missing`] when no URL was configured.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        required(self.database_url.as_ref(), "database_url")
    }

    /// Return the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)))
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
            .unwrap_or(crate::domain::DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Build the token verifier configuration.
    ///
    /// # Errors
    ///
    /// Fails when the project id is missing or the JWKS override is not a URL.
    pub fn firebase_config(&self) -> Result<FirebaseVerifierConfig, SettingsError> {
        let project_id = required(self.firebase_project_id.as_ref(), "firebase_project_id")?;
        let mut config = FirebaseVerifierConfig::for_project(project_id).map_err(|error| {
            SettingsError::InvalidUrl {
                name: "firebase_jwks_url",
                message: error.to_string(),
            }
        })?;
        if let Some(raw) = self.firebase_jwks_url.as_deref() {
            config.jwks_url = Url::parse(raw).map_err(|error| SettingsError::InvalidUrl {
                name: "firebase_jwks_url",
                message: error.to_string(),
            })?;
        }
        Ok(config)
    }

    /// Build the Cloudinary credentials.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Missing`] naming the first absent credential.
    pub fn cloudinary_config(&self) -> Result<CloudinaryConfig, SettingsError> {
        let cloud_name = required(self.cloudinary_cloud_name.as_ref(), "cloudinary_cloud_name")?;
        let api_key = required(self.cloudinary_api_key.as_ref(), "cloudinary_api_key")?;
        let api_secret = required(self.cloudinary_api_secret.as_ref(), "cloudinary_api_secret")?;
        Ok(CloudinaryConfig {
            cloud_name: cloud_name.to_owned(),
            api_key: api_key.to_owned(),
            api_secret: Zeroizing::new(api_secret.to_owned()),
            folder: self.upload_folder.clone(),
            request_timeout: CLOUDINARY_TIMEOUT,
        })
    }

    /// Session cookie inputs for [`session_settings`](crate::inbound::http::session_config::session_settings).
    pub fn session_inputs(&self) -> SessionInputs {
        SessionInputs {
            key_file: self.session_key_file.clone(),
            cookie_secure: self.cookie_secure(),
            same_site: self.same_site.clone(),
        }
    }
}
