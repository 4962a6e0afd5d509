//! Password hashing and password-reset tokens

use sha2::{Digest, Sha256};

use crate::errors::{internal_error, RestResult};

/// Bytes of randomness in an emailed reset token
const RESET_TOKEN_BYTES: usize = 20;

/// bcrypt is CPU-bound, so hashing runs on the blocking pool
pub async fn hash_password(password: &str, cost: u32) -> RestResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(internal_error)?
        .map_err(internal_error)
}

/// Check a password against a stored hash. Malformed hashes never match.
pub async fn verify_password(password: &str, hash: &str) -> RestResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(internal_error)?;
    Ok(verified)
}

/// Hex string of `len` random bytes
pub fn random_hex(len: usize) -> String {
    let bytes: Vec<u8> = (0..len).map(|_| rand::random::<u8>()).collect();
    hex::encode(bytes)
}

/// A reset token as emailed to the user, and the digest stored in its place
#[derive(Debug, Clone)]
pub struct ResetToken {
    pub token: String,
    pub token_hash: String,
}

impl ResetToken {
    pub fn generate() -> Self {
        let token = random_hex(RESET_TOKEN_BYTES);
        let token_hash = hash_reset_token(&token);
        Self { token, token_hash }
    }
}

/// sha256 hex digest of a reset token
pub fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
