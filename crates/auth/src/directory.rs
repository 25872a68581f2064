//! Account Directory capability trait.
//!
//! The core consumes only this surface; storage adapters live in the
//! infra crate. Every method maps a missing row to
//! [`AuthError::UserNotFound`](gatekey_core::AuthError::UserNotFound),
//! a duplicate email on insert to `EmailNotUnique`, and any other
//! storage failure to `Unexpected`.

use async_trait::async_trait;

use gatekey_core::{AuthResult, NewUser, Role, User, UserId};

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AuthResult<User>;

    async fn find_by_id(&self, id: UserId) -> AuthResult<User>;

    /// Insert a new user and return the assigned id.
    async fn insert(&self, user: NewUser) -> AuthResult<UserId>;

    async fn delete(&self, id: UserId) -> AuthResult<()>;

    /// Update display name and role. Password and email are deliberately
    /// not updatable: live tokens embed the email, and there is no
    /// revocation mechanism to invalidate them.
    async fn update_name_and_role(&self, id: UserId, name: &str, role: Role) -> AuthResult<()>;
}
