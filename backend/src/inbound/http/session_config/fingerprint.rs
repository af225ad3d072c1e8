//! Session key fingerprints.
//!
//! Startup logs the fingerprint so operators can tell which key is active
//! without the key itself reaching the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First eight bytes of the SHA-256 of the signing key, hex encoded.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_short_stable_hex() {
        let key = Key::from(&[7_u8; 64]);
        let first = key_fingerprint(&key);
        assert_eq!(first.len(), FINGERPRINT_BYTES * 2);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(first, key_fingerprint(&key));
    }

    #[test]
    fn distinct_keys_have_distinct_fingerprints() {
        assert_ne!(
            key_fingerprint(&Key::generate()),
            key_fingerprint(&Key::generate())
        );
    }
}
