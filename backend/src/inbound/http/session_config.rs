//! Session cookie configuration.
//!
//! Turns the session-related settings into a signing key and cookie policy.
//! Release builds refuse weak configurations that debug builds only warn
//! about.

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use cap_std::{ambient_authority, fs::Dir};
use tracing::{info, warn};
use zeroize::Zeroize;

pub mod fingerprint;

use fingerprint::key_fingerprint;

pub const SESSION_KEY_MIN_LEN: usize = 64;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates a missing key file by generating an ephemeral key.
    Debug,
    /// Requires a readable key file and a consistent cookie policy.
    Release,
}

impl BuildMode {
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session inputs as loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionInputs {
    pub key_file: Option<PathBuf>,
    pub cookie_secure: bool,
    pub same_site: Option<String>,
}

/// Validated session settings.
#[derive(Clone)]
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("session key file is not configured")]
    MissingKeyFile,
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("invalid same_site value '{value}'; expected {expected}")]
    InvalidSameSite {
        value: String,
        expected: &'static str,
    },
    #[error("same_site=None requires cookie_secure")]
    InsecureSameSiteNone,
}

/// Validate session inputs for the given build mode.
///
/// # Examples
///
/// ```rust
/// use learners_backend::inbound::http::session_config::{
///     BuildMode, SessionInputs, session_settings,
/// };
///
/// let inputs = SessionInputs {
///     key_file: None,
///     cookie_secure: false,
///     same_site: Some("Lax".into()),
/// };
/// let settings = session_settings(&inputs, BuildMode::Debug).expect("debug fallback");
/// assert!(!settings.cookie_secure);
/// ```
pub fn session_settings(
    inputs: &SessionInputs,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let same_site = same_site(inputs, mode)?;
    let key = session_key(inputs.key_file.as_deref(), mode)?;
    info!(fingerprint = %key_fingerprint(&key), "session key loaded");
    Ok(SessionSettings {
        key,
        cookie_secure: inputs.cookie_secure,
        same_site,
    })
}

fn same_site(inputs: &SessionInputs, mode: BuildMode) -> Result<SameSite, SessionConfigError> {
    let Some(value) = inputs.same_site.as_deref() else {
        return Ok(if mode.is_debug() {
            SameSite::Lax
        } else {
            SameSite::Strict
        });
    };
    let same_site = match value.trim().to_ascii_lowercase().as_str() {
        "lax" => SameSite::Lax,
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => {
            return Err(SessionConfigError::InvalidSameSite {
                value: value.to_owned(),
                expected: SAMESITE_EXPECTED,
            });
        }
    };
    if same_site == SameSite::None && !inputs.cookie_secure {
        if !mode.is_debug() {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("same_site=None without cookie_secure; browsers may reject the cookie");
    }
    Ok(same_site)
}

fn read_key_file(path: &Path) -> std::io::Result<Vec<u8>> {
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "key path has no file name")
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Dir::open_ambient_dir(parent, ambient_authority())?.read(file_name)
}

fn session_key(path: Option<&Path>, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let Some(path) = path else {
        if mode.is_debug() {
            warn!("no session key file configured; using temporary key (dev only)");
            return Ok(Key::generate());
        }
        return Err(SessionConfigError::MissingKeyFile);
    };
    let mut bytes = match read_key_file(path) {
        Ok(bytes) => bytes,
        Err(error) if mode.is_debug() => {
            warn!(path = %path.display(), %error, "using temporary session key (dev only)");
            return Ok(Key::generate());
        }
        Err(source) => {
            return Err(SessionConfigError::KeyRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let length = bytes.len();
    if length < SESSION_KEY_MIN_LEN {
        bytes.zeroize();
        return Err(SessionConfigError::KeyTooShort {
            path: path.to_path_buf(),
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}
