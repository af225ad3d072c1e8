//! Port for verifying externally issued identity tokens.
use async_trait::async_trait;

use crate::domain::{IdToken, VerifiedIdentity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity verifier adapters.
    pub enum IdentityVerifierError {
        /// The token is malformed, expired, or fails signature checks.
        InvalidToken { message: String } => "identity token rejected: {message}",
        /// Signing keys could not be fetched.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `token` and return the identity it asserts.
    async fn verify(&self, token: &IdToken) -> Result<VerifiedIdentity, IdentityVerifierError>;
}
