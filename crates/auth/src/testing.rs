//! Shared test fixtures: a call-counting in-memory directory.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use gatekey_core::{AuthError, AuthResult, NewUser, Role, User, UserId};

use crate::directory::UserDirectory;

/// Build a user record with an opaque (non-verifiable) hash.
pub(crate) fn fixture_user(id: i64, name: &str, email: &str, role: Role) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "unverifiable".to_string(),
        role,
        created_at: now,
        updated_at: now,
    }
}

/// Like [`fixture_user`], but with a real hash so login paths can verify.
/// Uses the minimum bcrypt cost to keep tests fast.
pub(crate) fn fixture_user_with_password(
    id: i64,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> User {
    let mut user = fixture_user(id, name, email, role);
    user.password_hash = bcrypt::hash(password, 4).unwrap();
    user
}

/// In-memory [`UserDirectory`] that counts round trips, so tests can
/// assert a path never reached the directory.
pub(crate) struct MockDirectory {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
    calls: AtomicUsize,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            calls: AtomicUsize::new(0),
        }
    }

    /// Insert or replace a record directly, bypassing call counting.
    pub fn put(&self, user: User) -> User {
        self.users
            .write()
            .unwrap()
            .insert(user.id.as_i64(), user.clone());
        self.next_id
            .fetch_max(user.id.as_i64() + 1, Ordering::SeqCst);
        user
    }

    pub fn remove(&self, id: UserId) {
        self.users.write().unwrap().remove(&id.as_i64());
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.users.read().unwrap().get(&id.as_i64()).cloned()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserDirectory for MockDirectory {
    async fn find_by_email(&self, email: &str) -> AuthResult<User> {
        self.tick();
        self.users
            .read()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<User> {
        self.tick();
        self.users
            .read()
            .unwrap()
            .get(&id.as_i64())
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn insert(&self, user: NewUser) -> AuthResult<UserId> {
        self.tick();
        let mut users = self.users.write().unwrap();
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
        self.tick();
        self.users
            .write()
            .unwrap()
            .remove(&id.as_i64())
            .map(|_| ())
            .ok_or(AuthError::UserNotFound)
    }

    async fn update_name_and_role(&self, id: UserId, name: &str, role: Role) -> AuthResult<()> {
        self.tick();
        let mut users = self.users.write().unwrap();
        let user = users.get_mut(&id.as_i64()).ok_or(AuthError::UserNotFound)?;
        user.name = name.to_string();
        user.role = role;
        user.updated_at = Utc::now();
        Ok(())
    }
}
