//! Account service: registration and login orchestration.

use std::sync::Arc;

use gatekey_core::{AuthError, AuthResult, NewUser, Role, UserId, validate_credentials};

use crate::directory::UserDirectory;
use crate::password;
use crate::tokens::{TokenPair, TokenService};

/// Public-facing account operations (registration and login).
pub struct AccountService {
    directory: Arc<dyn UserDirectory>,
    tokens: Arc<TokenService>,
}

impl AccountService {
    pub fn new(directory: Arc<dyn UserDirectory>, tokens: Arc<TokenService>) -> Self {
        Self { directory, tokens }
    }

    /// Register a new account and return its assigned id.
    ///
    /// Admin accounts cannot be self-registered; that is checked before
    /// anything else, regardless of other field validity. The
    /// `find_by_email` pre-check is best-effort only — the directory's
    /// unique index is the authoritative gate against concurrent
    /// registrations. The password is hashed before the insert, so a
    /// hashing failure leaves no partially-created user.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> AuthResult<UserId> {
        if role.is_admin() {
            tracing::warn!(email, "public registration attempted with admin role");
            return Err(AuthError::CannotCreateAdmin);
        }

        validate_credentials(name, email, password)?;

        match self.directory.find_by_email(email).await {
            Ok(_) => return Err(AuthError::EmailNotUnique),
            Err(AuthError::UserNotFound) => {}
            Err(e) => return Err(e),
        }

        let password_hash = password::hash(password)?;

        let id = self
            .directory
            .insert(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user = %id, email, "user registered");
        Ok(id)
    }

    /// Verify credentials and issue a fresh token pair.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<TokenPair> {
        let user = self.directory.find_by_email(email).await?;
        password::verify(&user.password_hash, password)?;

        let pair = self.tokens.issue(&user)?;
        tracing::info!(user = %user.id, "user logged in");
        Ok(pair)
    }
}
