//! In-memory Account Directory for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use gatekey_auth::UserDirectory;
use gatekey_core::{AuthError, AuthResult, NewUser, Role, User, UserId};

/// `RwLock<HashMap>`-backed directory: monotonic ids, unique emails.
///
/// Mirrors the observable contract of [`PgUserDirectory`](crate::PgUserDirectory)
/// so the service stack can run unchanged without a database.
#[derive(Debug)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> AuthResult<User> {
        self.users
            .read()
            .map_err(|e| AuthError::unexpected(e.to_string()))?
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<User> {
        self.users
            .read()
            .map_err(|e| AuthError::unexpected(e.to_string()))?
            .get(&id.as_i64())
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn insert(&self, user: NewUser) -> AuthResult<UserId> {
        let mut users = self
            .users
            .write()
            .map_err(|e| AuthError::unexpected(e.to_string()))?;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailNotUnique);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        users.insert(
            id,
            User {
                id: UserId::new(id),
                name: user.name,
                email: user.email,
                password_hash: user.password_hash,
                role: user.role,
                created_at: now,
                updated_at: now,
            },
        );

        Ok(UserId::new(id))
    }

    async fn delete(&self, id: UserId) -> AuthResult<()> {
        self.users
            .write()
            .map_err(|e| AuthError::unexpected(e.to_string()))?
            .remove(&id.as_i64())
            .map(|_| ())
            .ok_or(AuthError::UserNotFound)
    }

    async fn update_name_and_role(&self, id: UserId, name: &str, role: Role) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|e| AuthError::unexpected(e.to_string()))?;

        let user = users.get_mut(&id.as_i64()).ok_or(AuthError::UserNotFound)?;
        user.name = name.to_string();
        user.role = role;
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "unverifiable".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn insert_assigns_monotonic_ids() {
        let directory = InMemoryUserDirectory::new();

        let a = directory.insert(new_user("a@example.com")).await.unwrap();
        let b = directory.insert(new_user("b@example.com")).await.unwrap();

        assert_ne!(a.as_i64(), 0);
        assert!(b.as_i64() > a.as_i64());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let directory = InMemoryUserDirectory::new();

        directory.insert(new_user("a@example.com")).await.unwrap();
        assert_eq!(
            directory.insert(new_user("a@example.com")).await,
            Err(AuthError::EmailNotUnique)
        );
    }

    #[tokio::test]
    async fn lookups_by_email_and_id_agree() {
        let directory = InMemoryUserDirectory::new();

        let id = directory.insert(new_user("a@example.com")).await.unwrap();
        let by_email = directory.find_by_email("a@example.com").await.unwrap();
        let by_id = directory.find_by_id(id).await.unwrap();

        assert_eq!(by_email, by_id);
        assert_eq!(
            directory.find_by_email("ghost@example.com").await,
            Err(AuthError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn update_touches_name_role_and_timestamp() {
        let directory = InMemoryUserDirectory::new();

        let id = directory.insert(new_user("a@example.com")).await.unwrap();
        let before = directory.find_by_id(id).await.unwrap();

        directory
            .update_name_and_role(id, "Renamed User", Role::Admin)
            .await
            .unwrap();

        let after = directory.find_by_id(id).await.unwrap();
        assert_eq!(after.name, "Renamed User");
        assert_eq!(after.role, Role::Admin);
        assert_eq!(after.email, before.email);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let directory = InMemoryUserDirectory::new();

        let id = directory.insert(new_user("a@example.com")).await.unwrap();
        directory.delete(id).await.unwrap();

        assert_eq!(directory.find_by_id(id).await, Err(AuthError::UserNotFound));
        assert_eq!(directory.delete(id).await, Err(AuthError::UserNotFound));
    }
}
