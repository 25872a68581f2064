//! Claims codec: signed, tamper-evident token strings.
//!
//! Tokens are compact HS256-signed strings. Decoding is atomic: the
//! signature is verified first, then the payload must deserialize into
//! the full [`Claims`] record — every field present and correctly typed,
//! no defaults. A forged token therefore fails the signature check
//! before any field is ever looked at.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use gatekey_core::{AuthError, AuthResult, Role, User, UserId};

/// Decoded token payload.
///
/// Carries a snapshot of the user's identity at issuance time; after a
/// profile update the snapshot is stale until the next refresh (there is
/// no revocation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the directory-assigned user id.
    pub sub: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Derived from `role`; kept in the payload for fast checks.
    pub is_admin: bool,
    /// Distinguishes refresh tokens from access tokens. A refresh-flagged
    /// token must never be honored where an access token is expected, and
    /// vice versa.
    pub is_refresh: bool,
    /// Absolute expiry, unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Access-token claims for `user`, expiring at `expires_at`.
    pub fn access(user: &User, expires_at: DateTime<Utc>) -> Self {
        Self::for_user(user, expires_at, false)
    }

    /// Refresh-token claims for `user`, expiring at `expires_at`.
    pub fn refresh(user: &User, expires_at: DateTime<Utc>) -> Self {
        Self::for_user(user, expires_at, true)
    }

    fn for_user(user: &User, expires_at: DateTime<Utc>, is_refresh: bool) -> Self {
        Self {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_admin: user.role.is_admin(),
            is_refresh,
            exp: expires_at.timestamp(),
        }
    }
}

/// Serialize and sign a claims record under `secret`.
///
/// Signing failure is internal and fatal, never retried.
pub fn encode(claims: &Claims, secret: &[u8]) -> AuthResult<String> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::unexpected(format!("failed to sign token: {e}")))
}

/// Verify and deserialize a token string under `secret`.
///
/// A well-formed token past its expiry fails with
/// [`AuthError::TokenExpired`]; everything else — bad signature, wrong
/// structure, missing or mistyped field — fails with
/// [`AuthError::InvalidToken`]. Zero expiry leeway.
pub fn decode(token: &str, secret: &[u8]) -> AuthResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    match jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
            _ => Err(AuthError::InvalidToken),
        },
    }
}
