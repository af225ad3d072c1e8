//! Firebase Authentication adapter.
//!
//! Implements the `IdentityVerifier` port by checking RS256 ID tokens against
//! Google's published signing keys.

mod id_token_verifier;
mod signing_keys;

pub use id_token_verifier::{
    DEFAULT_JWKS_URL, FirebaseIdTokenVerifier, FirebaseVerifierConfig,
};
