//! Credential verifier: one-way password hashing and comparison.

use gatekey_core::{AuthError, AuthResult};

/// Hash a plaintext password with a random salt at the default cost.
///
/// Failure here means the process could not obtain entropy or allocate;
/// it is surfaced as [`AuthError::Unexpected`] and never retried.
pub fn hash(plaintext: &str) -> AuthResult<String> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
        .map_err(|e| AuthError::unexpected(format!("failed to hash password: {e}")))
}

/// Compare a presented password against a stored hash.
///
/// Constant-time by construction. Any mismatch, including a malformed
/// stored hash, is reported as [`AuthError::InvalidCredentials`].
pub fn verify(stored_hash: &str, plaintext: &str) -> AuthResult<()> {
    match bcrypt::verify(plaintext, stored_hash) {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(AuthError::InvalidCredentials),
    }
}
