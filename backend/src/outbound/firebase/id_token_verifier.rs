//! Reqwest-backed Firebase ID token verifier.
//!
//! Tokens must be RS256, signed by a key from the configured JWKS, issued by
//! `https://securetoken.google.com/<project>` for audience `<project>`, and
//! unexpired. The `sub` claim is the Firebase UID.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::ports::{IdentityVerifier, IdentityVerifierError};
use crate::domain::{FirebaseUid, IdToken, VerifiedIdentity};

use super::signing_keys::{KeyCache, KeySet};

/// Google's JWKS endpoint for Firebase ID token signing keys.
pub const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Project binding and key refresh settings.
#[derive(Debug, Clone)]
pub struct FirebaseVerifierConfig {
    pub project_id: String,
    pub jwks_url: Url,
    /// How long fetched keys are trusted before a refetch.
    pub key_ttl: Duration,
    /// Unknown `kid`s do not trigger another fetch within this window.
    pub min_refetch_interval: Duration,
    pub request_timeout: Duration,
}

impl FirebaseVerifierConfig {
    /// Defaults: Google's JWKS, one hour key TTL, at most one refetch per
    /// thirty seconds, ten second fetch timeout.
    ///
    /// # Errors
    ///
    /// Fails only if [`DEFAULT_JWKS_URL`] does not parse.
    pub fn for_project(project_id: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            project_id: project_id.into(),
            jwks_url: Url::parse(DEFAULT_JWKS_URL)?,
            key_ttl: Duration::from_secs(60 * 60),
            min_refetch_interval: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
        })
    }

    fn issuer(&self) -> String {
        format!("{ISSUER_PREFIX}{}", self.project_id)
    }
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

/// Verifies Firebase ID tokens, caching signing keys between requests.
pub struct FirebaseIdTokenVerifier {
    client: Client,
    config: FirebaseVerifierConfig,
    validation: Validation,
    keys: KeyCache,
    refresh: Mutex<()>,
}

impl FirebaseIdTokenVerifier {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: FirebaseVerifierConfig) -> Result<Self, reqwest::Error> {
        let keys = KeyCache::new(config.key_ttl);
        Self::with_cache(config, keys)
    }

    fn with_cache(config: FirebaseVerifierConfig, keys: KeyCache) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            validation: validation_for(&config),
            config,
            keys,
            refresh: Mutex::new(()),
        })
    }

    async fn fetch_keys(&self) -> Result<KeySet, IdentityVerifierError> {
        let response = self
            .client
            .get(self.config.jwks_url.clone())
            .send()
            .await
            .map_err(|error| IdentityVerifierError::unavailable(error.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(IdentityVerifierError::unavailable(format!(
                "signing key endpoint returned {}",
                status.as_u16()
            )));
        }
        let set: JwkSet = response
            .json()
            .await
            .map_err(|error| IdentityVerifierError::unavailable(error.to_string()))?;
        let keys = KeySet::from_jwk_set(&set, Instant::now());
        info!(url = %self.config.jwks_url, "refreshed Firebase signing keys");
        Ok(keys)
    }

    /// Cached key for `kid`, refetching once on a miss or stale cache.
    ///
    /// Refreshes are serialised, and a miss within `min_refetch_interval` of
    /// the last fetch is rejected without contacting the endpoint.
    async fn key_for(&self, kid: &str) -> Result<DecodingKey, IdentityVerifierError> {
        if let Some(key) = self.keys.lookup(kid, Instant::now()).await {
            return Ok(key);
        }
        let _refresh = self.refresh.lock().await;
        let now = Instant::now();
        if let Some(key) = self.keys.lookup(kid, now).await {
            return Ok(key);
        }
        if self
            .keys
            .fetched_within(self.config.min_refetch_interval, now)
            .await
        {
            debug!(%kid, "unknown signing key; refetch throttled");
            return Err(IdentityVerifierError::invalid_token("unknown signing key"));
        }
        let set = self.fetch_keys().await?;
        self.keys
            .replace_and_lookup(set, kid)
            .await
            .ok_or_else(|| IdentityVerifierError::invalid_token("unknown signing key"))
    }
}

fn validation_for(config: &FirebaseVerifierConfig) -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[config.project_id.as_str()]);
    validation.set_issuer(&[config.issuer()]);
    validation.set_required_spec_claims(&["exp", "iat", "aud", "iss", "sub"]);
    validation
}

fn invalid(error: &jsonwebtoken::errors::Error) -> IdentityVerifierError {
    debug!(%error, "rejected identity token");
    IdentityVerifierError::invalid_token(error.to_string())
}

#[async_trait]
impl IdentityVerifier for FirebaseIdTokenVerifier {
    async fn verify(&self, token: &IdToken) -> Result<VerifiedIdentity, IdentityVerifierError> {
        let raw = token.expose();
        let header = jsonwebtoken::decode_header(raw).map_err(|error| invalid(&error))?;
        if header.alg != Algorithm::RS256 {
            return Err(IdentityVerifierError::invalid_token(format!(
                "unexpected signing algorithm {:?}",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| IdentityVerifierError::invalid_token("token header has no kid"))?;
        let key = self.key_for(&kid).await?;

        let claims = jsonwebtoken::decode::<FirebaseClaims>(raw, &key, &self.validation)
            .map_err(|error| invalid(&error))?
            .claims;
        let uid = FirebaseUid::new(&claims.sub)
            .map_err(|_| IdentityVerifierError::invalid_token("token subject is empty"))?;
        Ok(VerifiedIdentity {
            uid,
            email: claims.email,
            name: claims.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use jsonwebtoken::{EncodingKey, Header};
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> FirebaseVerifierConfig {
        FirebaseVerifierConfig {
            project_id: "little-learners".to_owned(),
            // Nothing listens on the discard port, so refreshes fail fast.
            jwks_url: Url::parse("http://127.0.0.1:9/keys").expect("url"),
            key_ttl: Duration::from_secs(60),
            min_refetch_interval: Duration::from_secs(30),
            request_timeout: Duration::from_millis(500),
        }
    }

    fn hs256_token(kid: Option<&str>) -> IdToken {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = kid.map(str::to_owned);
        let raw = jsonwebtoken::encode(
            &header,
            &serde_json::json!({ "sub": "uid-1" }),
            &EncodingKey::from_secret(b"secret"),
        )
        .expect("token");
        IdToken::new(raw).expect("id token")
    }

    /// Structurally valid RS256 token with a garbage signature.
    fn rs256_header_token(kid: Option<&str>) -> IdToken {
        let mut header = serde_json::json!({ "alg": "RS256", "typ": "JWT" });
        if let Some(kid) = kid {
            header["kid"] = serde_json::Value::from(kid);
        }
        IdToken::new(format!(
            "{}.{}.c2ln",
            URL_SAFE_NO_PAD.encode(header.to_string()),
            URL_SAFE_NO_PAD.encode(r#"{"sub":"uid-1"}"#)
        ))
        .expect("id token")
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_malformed_tokens(config: FirebaseVerifierConfig) {
        let verifier = FirebaseIdTokenVerifier::new(config).expect("verifier");
        let err = verifier
            .verify(&IdToken::new("not-a-jwt").expect("token"))
            .await
            .expect_err("malformed");
        assert!(matches!(err, IdentityVerifierError::InvalidToken { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_symmetric_algorithms(config: FirebaseVerifierConfig) {
        let verifier = FirebaseIdTokenVerifier::new(config).expect("verifier");
        let err = verifier
            .verify(&hs256_token(Some("k1")))
            .await
            .expect_err("hs256");
        assert!(matches!(err, IdentityVerifierError::InvalidToken { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_tokens_without_kid(config: FirebaseVerifierConfig) {
        let verifier = FirebaseIdTokenVerifier::new(config).expect("verifier");
        let err = verifier
            .verify(&rs256_header_token(None))
            .await
            .expect_err("no kid");
        assert!(matches!(err, IdentityVerifierError::InvalidToken { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_key_endpoint_is_unavailable(config: FirebaseVerifierConfig) {
        let verifier = FirebaseIdTokenVerifier::new(config).expect("verifier");
        let err = verifier
            .verify(&rs256_header_token(Some("k1")))
            .await
            .expect_err("no keys");
        assert!(matches!(err, IdentityVerifierError::Unavailable { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn cached_key_with_bad_signature_is_invalid(config: FirebaseVerifierConfig) {
        let keys = KeyCache::primed(
            config.key_ttl,
            KeySet::from_keys(
                HashMap::from([(
                    "k1".to_owned(),
                    DecodingKey::from_rsa_components("AQAB", "AQAB").expect("key"),
                )]),
                Instant::now(),
            ),
        );
        let verifier = FirebaseIdTokenVerifier::with_cache(config, keys).expect("verifier");
        let err = verifier
            .verify(&rs256_header_token(Some("k1")))
            .await
            .expect_err("bad signature");
        assert!(matches!(err, IdentityVerifierError::InvalidToken { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_kid_right_after_a_fetch_is_not_refetched(config: FirebaseVerifierConfig) {
        // The endpoint is unreachable, so a refetch would surface as Unavailable.
        let keys = KeyCache::primed(
            config.key_ttl,
            KeySet::from_keys(
                HashMap::from([("k1".to_owned(), DecodingKey::from_secret(b"k"))]),
                Instant::now(),
            ),
        );
        let verifier = FirebaseIdTokenVerifier::with_cache(config, keys).expect("verifier");
        for _ in 0..3 {
            let err = verifier
                .verify(&rs256_header_token(Some("rotated")))
                .await
                .expect_err("unknown kid");
            assert!(matches!(err, IdentityVerifierError::InvalidToken { .. }));
        }
    }

    #[rstest]
    fn issuer_is_bound_to_the_project(config: FirebaseVerifierConfig) {
        assert_eq!(config.issuer(), "https://securetoken.google.com/little-learners");
    }
}
