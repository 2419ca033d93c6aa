//! One-way password hashing.
//!
//! bcrypt is CPU-bound, so both directions run on the blocking pool instead
//! of stalling the request executor.

use anyhow::Context as _;

use crate::error::ApiError;

/// bcrypt work factor.
pub const PASSWORD_HASH_COST: u32 = 10;

/// Hash `plaintext` with a fresh salt.
pub async fn hash_password(plaintext: &str) -> Result<String, ApiError> {
    let plaintext = plaintext.to_owned();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, PASSWORD_HASH_COST))
        .await
        .context("join password hashing task")?
        .context("hash password")?;
    Ok(hashed)
}

/// Check `plaintext` against a stored bcrypt hash.
///
/// A malformed stored hash is an internal error, not a mismatch.
pub async fn verify_password(plaintext: &str, stored_hash: &str) -> Result<bool, ApiError> {
    let plaintext = plaintext.to_owned();
    let stored_hash = stored_hash.to_owned();
    let matched = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &stored_hash))
        .await
        .context("join password verification task")?
        .context("verify password")?;
    Ok(matched)
}
