//! Admin service: user administration gated on the admin role.

use std::sync::Arc;

use gatekey_core::{AuthError, AuthResult, Role, User, UserId, validate_name};

use crate::directory::UserDirectory;
use crate::gate::Gate;

/// Admin-only operations over arbitrary user records.
///
/// Every operation authorizes the presented access token through the
/// [`Gate`] first; a caller below the admin role is denied before any
/// directory lookup happens.
pub struct AdminService {
    directory: Arc<dyn UserDirectory>,
    gate: Arc<Gate>,
}

impl AdminService {
    pub fn new(directory: Arc<dyn UserDirectory>, gate: Arc<Gate>) -> Self {
        Self { directory, gate }
    }

    /// Fetch an arbitrary user record by id.
    pub async fn get_user(&self, access_token: &str, id: UserId) -> AuthResult<User> {
        self.gate.authorize(access_token, Role::Admin)?;
        self.directory.find_by_id(id).await
    }

    /// Update a user's display name and role.
    ///
    /// Password and email stay untouched: live tokens embed the email,
    /// and without a revocation mechanism changing either would strand
    /// or break sessions that are still valid.
    pub async fn update_user(
        &self,
        access_token: &str,
        id: UserId,
        name: &str,
        role: Role,
    ) -> AuthResult<()> {
        self.gate.authorize(access_token, Role::Admin)?;
        validate_name(name)?;

        self.directory.update_name_and_role(id, name, role).await?;
        tracing::info!(user = %id, "user profile updated");
        Ok(())
    }

    /// Delete a user record.
    ///
    /// An admin deleting their own id is rejected with
    /// [`AuthError::CannotDeleteSelf`] so they cannot lock themselves out
    /// with their own token. The check is plain id equality against the
    /// token's claims.
    pub async fn delete_user(&self, access_token: &str, id: UserId) -> AuthResult<()> {
        let claims = self.gate.authorize(access_token, Role::Admin)?;
        if claims.sub == id {
            return Err(AuthError::CannotDeleteSelf);
        }

        self.directory.delete(id).await?;
        tracing::info!(user = %id, deleted_by = %claims.sub, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDirectory, fixture_user};
    use crate::tokens::TokenService;
    use chrono::Duration;
    use gatekey_core::ValidationError;

    const SECRET: &str = "test-secret";

    struct Fixture {
        directory: Arc<MockDirectory>,
        svc: AdminService,
        admin_token: String,
        user_token: String,
    }

    /// Directory with an admin (id 1) and a plain user (id 2), plus a
    /// valid access token for each.
    fn fixture() -> Fixture {
        let directory = Arc::new(MockDirectory::new());
        let admin = directory.put(fixture_user(1, "Admin User", "a@example.com", Role::Admin));
        let user = directory.put(fixture_user(2, "Test User", "t@example.com", Role::User));

        let tokens = TokenService::new(
            SECRET,
            Arc::clone(&directory) as Arc<dyn UserDirectory>,
            Duration::minutes(15),
            Duration::hours(7),
        );
        let admin_token = tokens.issue(&admin).unwrap().access_token;
        let user_token = tokens.issue(&user).unwrap().access_token;

        let gate = Arc::new(Gate::new(
            SECRET,
            Arc::clone(&directory) as Arc<dyn UserDirectory>,
        ));
        let svc = AdminService::new(Arc::clone(&directory) as Arc<dyn UserDirectory>, gate);

        Fixture {
            directory,
            svc,
            admin_token,
            user_token,
        }
    }

    #[tokio::test]
    async fn admin_can_fetch_any_user() {
        let f = fixture();

        let user = f.svc.get_user(&f.admin_token, UserId::new(2)).await.unwrap();
        assert_eq!(user.email, "t@example.com");
    }

    #[tokio::test]
    async fn non_admin_is_denied_before_any_lookup() {
        let f = fixture();
        f.directory.reset_calls();

        assert_eq!(
            f.svc.delete_user(&f.user_token, UserId::new(1)).await,
            Err(AuthError::PermissionDenied)
        );
        assert_eq!(
            f.svc.get_user(&f.user_token, UserId::new(1)).await,
            Err(AuthError::PermissionDenied)
        );
        assert_eq!(f.directory.calls(), 0);
    }

    #[tokio::test]
    async fn admin_cannot_delete_self() {
        let f = fixture();

        assert_eq!(
            f.svc.delete_user(&f.admin_token, UserId::new(1)).await,
            Err(AuthError::CannotDeleteSelf)
        );
        assert!(f.directory.get(UserId::new(1)).is_some());
    }

    #[tokio::test]
    async fn admin_deletes_another_user() {
        let f = fixture();

        f.svc
            .delete_user(&f.admin_token, UserId::new(2))
            .await
            .unwrap();
        assert!(f.directory.get(UserId::new(2)).is_none());
    }

    #[tokio::test]
    async fn deleting_a_missing_user_fails() {
        let f = fixture();

        assert_eq!(
            f.svc.delete_user(&f.admin_token, UserId::new(99)).await,
            Err(AuthError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn update_changes_name_and_role() {
        let f = fixture();

        f.svc
            .update_user(&f.admin_token, UserId::new(2), "Promoted User", Role::Admin)
            .await
            .unwrap();

        let updated = f.directory.get(UserId::new(2)).unwrap();
        assert_eq!(updated.name, "Promoted User");
        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn update_rejects_invalid_names() {
        let f = fixture();

        assert_eq!(
            f.svc
                .update_user(&f.admin_token, UserId::new(2), "ab", Role::User)
                .await,
            Err(AuthError::Validation(ValidationError::InvalidName))
        );
    }

    #[tokio::test]
    async fn refresh_token_is_not_an_admin_credential() {
        let directory = Arc::new(MockDirectory::new());
        let admin = directory.put(fixture_user(1, "Admin User", "a@example.com", Role::Admin));

        let tokens = TokenService::new(
            SECRET,
            Arc::clone(&directory) as Arc<dyn UserDirectory>,
            Duration::minutes(15),
            Duration::hours(7),
        );
        let pair = tokens.issue(&admin).unwrap();

        let gate = Arc::new(Gate::new(
            SECRET,
            Arc::clone(&directory) as Arc<dyn UserDirectory>,
        ));
        let svc = AdminService::new(Arc::clone(&directory) as Arc<dyn UserDirectory>, gate);

        assert_eq!(
            svc.get_user(&pair.refresh_token, UserId::new(1)).await,
            Err(AuthError::InvalidToken)
        );
    }
}
