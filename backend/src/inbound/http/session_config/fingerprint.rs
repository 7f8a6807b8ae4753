//! Short fingerprint of the session key for the startup log line.
//!
//! Every dashboard worker must share one key or logins made on one worker
//! fail on another. Comparing fingerprints across startup logs shows whether
//! they do without printing the key.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// Hex of the first 8 bytes of the SHA-256 digest of the signing half.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use dashboard::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
