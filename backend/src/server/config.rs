//! Inputs the HTTP server is assembled from.

use std::net::SocketAddr;
use std::sync::Arc;

use learners_backend::domain::DEFAULT_MAX_UPLOAD_BYTES;
use learners_backend::inbound::http::session_config::SessionSettings;
use learners_backend::outbound::cloudinary::CloudinaryFileStore;
use learners_backend::outbound::firebase::FirebaseIdTokenVerifier;
use learners_backend::outbound::persistence::DbPool;

/// External systems the production services are built over.
pub struct ExternalAdapters {
    pub pool: DbPool,
    pub verifier: Arc<FirebaseIdTokenVerifier>,
    pub store: Arc<CloudinaryFileStore>,
}

/// Session cookie policy, listener address and adapters for one server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upload_limit: usize,
    pub(crate) adapters: ExternalAdapters,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, adapters: ExternalAdapters) -> Self {
        Self {
            session,
            bind_addr,
            upload_limit: DEFAULT_MAX_UPLOAD_BYTES,
            adapters,
        }
    }

    /// Override the largest accepted upload, in bytes.
    #[must_use]
    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit = bytes;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
