//! Stub adapters for the identity provider and the file store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{FileStore, FileStoreError, IdentityVerifier, IdentityVerifierError};
use crate::domain::{FirebaseUid, IdToken, StoredFile, UploadedFile, VerifiedIdentity};

/// Accepts only tokens registered with [`StubIdentityVerifier::with_identity`].
#[derive(Debug, Default, Clone)]
pub struct StubIdentityVerifier {
    identities: HashMap<String, VerifiedIdentity>,
}

impl StubIdentityVerifier {
    /// Register `token` as asserting the given uid, email and display name.
    #[must_use]
    pub fn with_identity(mut self, token: &str, uid: &str, email: &str, name: Option<&str>) -> Self {
        let uid = match FirebaseUid::new(uid) {
            Ok(uid) => uid,
            Err(error) => panic!("invalid stub uid {uid:?}: {error}"),
        };
        self.identities.insert(
            token.to_owned(),
            VerifiedIdentity {
                uid,
                email: Some(email.to_owned()),
                name: name.map(str::to_owned),
            },
        );
        self
    }
}

#[async_trait]
impl IdentityVerifier for StubIdentityVerifier {
    async fn verify(&self, token: &IdToken) -> Result<VerifiedIdentity, IdentityVerifierError> {
        self.identities
            .get(token.expose())
            .cloned()
            .ok_or_else(|| IdentityVerifierError::invalid_token("unknown stub token"))
    }
}

/// Records uploads and hands back `memory://` URLs.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    stored: Mutex<Vec<UploadedFile>>,
}

impl MemoryFileStore {
    /// Names of every stored file, in upload order.
    pub fn stored_names(&self) -> Vec<String> {
        self.stored
            .lock()
            .map(|files| files.iter().map(|f| f.file_name.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn store(&self, file: &UploadedFile) -> Result<StoredFile, FileStoreError> {
        let mut stored = self
            .stored
            .lock()
            .map_err(|_| FileStoreError::unavailable("memory store poisoned"))?;
        stored.push(file.clone());
        Ok(StoredFile {
            url: format!("memory://uploads/{}/{}", stored.len(), file.file_name),
        })
    }
}
