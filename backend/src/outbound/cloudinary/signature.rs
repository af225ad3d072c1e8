//! Cloudinary request signing.
//!
//! The signature is the hex SHA-256 of the parameters sorted by name, joined
//! as `name=value` pairs with `&`, followed directly by the API secret.

use sha2::{Digest, Sha256};

pub(super) fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, value)| !value.is_empty()).collect();
    sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
    let joined = sorted
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
