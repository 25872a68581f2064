//! Authorization gate: allow/deny decisions from presented access tokens.

use std::sync::Arc;

use gatekey_core::{AuthError, AuthResult, Role, User};

use crate::claims::{self, Claims};
use crate::directory::UserDirectory;

/// Decodes access tokens and yields the caller's identity or an
/// authorization decision.
pub struct Gate {
    directory: Arc<dyn UserDirectory>,
    secret: Vec<u8>,
}

impl Gate {
    pub fn new(secret: impl Into<Vec<u8>>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            directory,
            secret: secret.into(),
        }
    }

    /// Decode and reject refresh-flagged tokens: a refresh token is never
    /// accepted where an access token is expected.
    fn decode_access(&self, access_token: &str) -> AuthResult<Claims> {
        let claims = claims::decode(access_token, &self.secret)?;
        if claims.is_refresh {
            tracing::warn!(user = %claims.sub, "refresh token presented as access token");
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Resolve the caller to their **current** directory record.
    ///
    /// The token's identity snapshot may be stale; re-fetching by the
    /// embedded email makes role/name reflect the latest state. Fails
    /// with `UserNotFound` when the account has been deleted since
    /// issuance.
    pub async fn authenticate(&self, access_token: &str) -> AuthResult<User> {
        let claims = self.decode_access(access_token)?;
        self.directory.find_by_email(&claims.email).await
    }

    /// Check that the token's role meets `required`.
    ///
    /// Pure decode + compare: a denial is decided before any directory
    /// round trip. Returns the claims so callers can apply further
    /// identity checks (e.g. the self-delete guard).
    pub fn authorize(&self, access_token: &str, required: Role) -> AuthResult<Claims> {
        let claims = self.decode_access(access_token)?;
        if !claims.role.meets(required) {
            return Err(AuthError::PermissionDenied);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDirectory, fixture_user};
    use crate::tokens::TokenService;
    use chrono::Duration;

    const SECRET: &str = "test-secret";

    fn issue_pair(directory: &Arc<MockDirectory>, user: &User) -> crate::tokens::TokenPair {
        TokenService::new(
            SECRET,
            Arc::clone(directory) as Arc<dyn UserDirectory>,
            Duration::minutes(15),
            Duration::hours(7),
        )
        .issue(user)
        .unwrap()
    }

    #[tokio::test]
    async fn authenticate_returns_current_record() {
        let directory = Arc::new(MockDirectory::new());
        let user = directory.put(fixture_user(1, "Old Name", "t@example.com", Role::User));
        let gate = Gate::new(SECRET, Arc::clone(&directory) as Arc<dyn UserDirectory>);

        let pair = issue_pair(&directory, &user);

        // Rename after issuance; authenticate must see the new name.
        directory.put(fixture_user(1, "New Name", "t@example.com", Role::User));

        let resolved = gate.authenticate(&pair.access_token).await.unwrap();
        assert_eq!(resolved.name, "New Name");
    }

    #[tokio::test]
    async fn authenticate_rejects_refresh_tokens() {
        let directory = Arc::new(MockDirectory::new());
        let user = directory.put(fixture_user(1, "Test User", "t@example.com", Role::User));
        let gate = Gate::new(SECRET, Arc::clone(&directory) as Arc<dyn UserDirectory>);

        let pair = issue_pair(&directory, &user);

        assert_eq!(
            gate.authenticate(&pair.refresh_token).await,
            Err(AuthError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn authenticate_fails_for_deleted_account() {
        let directory = Arc::new(MockDirectory::new());
        let user = directory.put(fixture_user(1, "Test User", "t@example.com", Role::User));
        let gate = Gate::new(SECRET, Arc::clone(&directory) as Arc<dyn UserDirectory>);

        let pair = issue_pair(&directory, &user);
        directory.remove(user.id);

        assert_eq!(
            gate.authenticate(&pair.access_token).await,
            Err(AuthError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn foreign_secret_is_invalid() {
        let directory = Arc::new(MockDirectory::new());
        let user = directory.put(fixture_user(1, "Test User", "t@example.com", Role::User));
        let gate = Gate::new(SECRET, Arc::clone(&directory) as Arc<dyn UserDirectory>);

        let foreign_pair = TokenService::new(
            "other-secret",
            Arc::clone(&directory) as Arc<dyn UserDirectory>,
            Duration::minutes(15),
            Duration::hours(7),
        )
        .issue(&user)
        .unwrap();

        assert_eq!(
            gate.authenticate(&foreign_pair.access_token).await,
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn authorize_denies_below_required_role_without_io() {
        let directory = Arc::new(MockDirectory::new());
        let user = directory.put(fixture_user(1, "Test User", "t@example.com", Role::User));
        let gate = Gate::new(SECRET, Arc::clone(&directory) as Arc<dyn UserDirectory>);

        let pair = issue_pair(&directory, &user);
        directory.reset_calls();

        assert_eq!(
            gate.authorize(&pair.access_token, Role::Admin)
                .map(|_| ()),
            Err(AuthError::PermissionDenied)
        );
        assert_eq!(directory.calls(), 0);
    }

    #[test]
    fn authorize_allows_admin_for_admin_operations() {
        let directory = Arc::new(MockDirectory::new());
        let admin = directory.put(fixture_user(2, "Admin User", "a@example.com", Role::Admin));
        let gate = Gate::new(SECRET, Arc::clone(&directory) as Arc<dyn UserDirectory>);

        let pair = issue_pair(&directory, &admin);

        let claims = gate
            .authorize(&pair.access_token, Role::Admin)
            .unwrap();
        assert_eq!(claims.sub, admin.id);
        assert!(claims.is_admin);
    }
}
