//! Argon2id `PasswordHasher` adapter.
//!
//! Hashes are PHC strings with a 16-byte random salt and the crate's default
//! Argon2id parameters. Hashing and verification run on Tokio's blocking pool
//! so request workers are not stalled by the deliberately slow primitive.

use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;
use password_hash::{PasswordHash as PhcHash, SaltString};
use tokio::task::spawn_blocking;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

const SALT_LEN: usize = 16;

/// Argon2id password hasher.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

fn hash_blocking(password: &str) -> Result<PasswordHash, PasswordHasherError> {
    let mut salt_bytes = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|err| PasswordHasherError::hashing(format!("salt generation failed: {err}")))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))?
        .to_string();
    PasswordHash::new(phc).map_err(|err| PasswordHasherError::hashing(err.to_string()))
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool, PasswordHasherError> {
    let parsed =
        PhcHash::new(hash).map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHasherError::hashing(err.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|err| PasswordHasherError::hashing(format!("hashing task failed: {err}")))?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.as_str().to_owned();
        spawn_blocking(move || verify_blocking(&password, &hash))
            .await
            .map_err(|err| PasswordHasherError::hashing(format!("verification task failed: {err}")))?
    }
}
