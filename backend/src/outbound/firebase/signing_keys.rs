//! Cached Firebase signing keys, keyed by `kid`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::JwkSet;
use tokio::sync::RwLock;
use tracing::warn;

/// Decoding keys from one JWKS fetch.
pub(super) struct KeySet {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
}

impl KeySet {
    /// Keep every key that carries a `kid` and decodes. Others are skipped.
    pub(super) fn from_jwk_set(set: &JwkSet, fetched_at: Instant) -> Self {
        let keys = set
            .keys
            .iter()
            .filter_map(|jwk| {
                let kid = jwk.common.key_id.clone()?;
                match DecodingKey::from_jwk(jwk) {
                    Ok(key) => Some((kid, key)),
                    Err(error) => {
                        warn!(%kid, %error, "skipping unusable signing key");
                        None
                    }
                }
            })
            .collect();
        Self { keys, fetched_at }
    }

    #[cfg(test)]
    pub(super) fn from_keys(keys: HashMap<String, DecodingKey>, fetched_at: Instant) -> Self {
        Self { keys, fetched_at }
    }

    fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.keys.len()
    }
}

/// Shared key cache. Readers proceed concurrently; a refresh takes the
/// write lock.
pub(super) struct KeyCache {
    ttl: Duration,
    inner: RwLock<Option<KeySet>>,
}

impl KeyCache {
    pub(super) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(None),
        }
    }

    #[cfg(test)]
    pub(super) fn primed(ttl: Duration, set: KeySet) -> Self {
        Self {
            ttl,
            inner: RwLock::new(Some(set)),
        }
    }

    /// Look up `kid` in a fresh key set. Returns `None` when the cache is
    /// empty, stale, or lacks the key.
    pub(super) async fn lookup(&self, kid: &str, now: Instant) -> Option<DecodingKey> {
        let guard = self.inner.read().await;
        guard
            .as_ref()
            .filter(|set| set.is_fresh(self.ttl, now))
            .and_then(|set| set.keys.get(kid).cloned())
    }

    /// True when the cached set was fetched less than `window` before `now`.
    pub(super) async fn fetched_within(&self, window: Duration, now: Instant) -> bool {
        self.inner
            .read()
            .await
            .as_ref()
            .is_some_and(|set| now.saturating_duration_since(set.fetched_at) < window)
    }

    /// Store a new key set and return the key for `kid`, if present.
    pub(super) async fn replace_and_lookup(&self, set: KeySet, kid: &str) -> Option<DecodingKey> {
        let key = set.keys.get(kid).cloned();
        *self.inner.write().await = Some(set);
        key
    }
}
