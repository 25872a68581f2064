//! Token lifecycle manager: issuing and refreshing signed pairs.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use gatekey_core::{AuthError, AuthResult, User};

use crate::claims::{self, Claims};
use crate::directory::UserDirectory;

/// An access/refresh pair, never persisted server-side.
///
/// Both expiry instants equal the `exp` embedded in the corresponding
/// token string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Issues and refreshes token pairs under a single signing secret.
///
/// TTLs are fixed at construction for the process lifetime; access TTL
/// is expected to be much shorter than refresh TTL.
pub struct TokenService {
    directory: Arc<dyn UserDirectory>,
    secret: Vec<u8>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(
        secret: impl Into<Vec<u8>>,
        directory: Arc<dyn UserDirectory>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            directory,
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue a fresh pair for `user`.
    ///
    /// Both claim sets carry identical identity data; only the refresh
    /// flag and TTL differ. Expiries are computed once from a single
    /// issuance instant. A repeated call produces a different, equally
    /// valid pair — callers must not assume determinism.
    pub fn issue(&self, user: &User) -> AuthResult<TokenPair> {
        let now = Utc::now();
        let access_expires_at = whole_seconds(now + self.access_ttl);
        let refresh_expires_at = whole_seconds(now + self.refresh_ttl);

        let access_token = claims::encode(&Claims::access(user, access_expires_at), &self.secret)?;
        let refresh_token =
            claims::encode(&Claims::refresh(user, refresh_expires_at), &self.secret)?;

        Ok(TokenPair {
            access_token,
            access_expires_at,
            refresh_token,
            refresh_expires_at,
        })
    }

    /// Exchange a valid refresh token for a new pair.
    ///
    /// Decode failures propagate without touching the directory. The user
    /// is re-fetched by the embedded email, so name/role changes take
    /// effect here even though the old tokens stay valid until their own
    /// expiry.
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let claims = claims::decode(refresh_token, &self.secret)?;
        if !claims.is_refresh {
            tracing::warn!(user = %claims.sub, "access token presented on the refresh path");
            return Err(AuthError::InvalidToken);
        }

        let user = self.directory.find_by_email(&claims.email).await?;
        tracing::info!(user = %user.id, "token pair refreshed");
        self.issue(&user)
    }

    /// Decode a token under this service's secret without any flag check.
    pub fn decode(&self, token: &str) -> AuthResult<Claims> {
        claims::decode(token, &self.secret)
    }
}

fn whole_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(instant.timestamp(), 0).unwrap_or(instant)
}
