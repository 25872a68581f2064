//! Postgres-backed Account Directory.
//!
//! Owns schema bootstrap for the `users` table and the one-time seed of
//! the bootstrap admin account — the only path that may create an admin.
//! The `UNIQUE` index on `email` is the authoritative uniqueness gate;
//! the service-level pre-check is best-effort only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use gatekey_auth::{UserDirectory, password};
use gatekey_core::{AuthError, AuthResult, NewUser, Role, User, UserId};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            BIGSERIAL PRIMARY KEY,
    name          TEXT        NOT NULL,
    email         TEXT        NOT NULL UNIQUE,
    password_hash TEXT        NOT NULL,
    role          TEXT        NOT NULL DEFAULT 'user',
    created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at    TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Postgres unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    /// Connect, ping, and bootstrap the schema.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(database_url)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;
        tracing::info!("connected to postgres, users schema ready");

        Ok(Self { pool })
    }

    /// Seed the bootstrap admin from configured credentials.
    ///
    /// Runs only against an empty table, so a restart against live data
    /// never resurrects or duplicates the admin.
    pub async fn seed_admin(&self, name: &str, email: &str, plaintext: &str) -> anyhow::Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        if count != 0 {
            tracing::warn!("users table is not empty, skipping admin seed");
            return Ok(());
        }

        let password_hash =
            password::hash(plaintext).map_err(|e| anyhow::anyhow!("admin seed: {e}"))?;

        sqlx::query("INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4)")
            .bind(name)
            .bind(email)
            .bind(&password_hash)
            .bind(Role::Admin.as_str())
            .execute(&self.pool)
            .await?;

        tracing::info!(email, "bootstrap admin created");
        Ok(())
    }
}

fn user_from_row(row: &PgRow) -> AuthResult<User> {
    let role: String = row.get("role");
    Ok(User {
        id: UserId::new(row.get::<i64, _>("id")),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: role
            .parse()
            .map_err(|e| AuthError::unexpected(format!("stored role is corrupt: {e}")))?,
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    })
}

fn map_sqlx_error(e: sqlx::Error) -> AuthError {
    match &e {
        sqlx::Error::RowNotFound => AuthError::UserNotFound,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            AuthError::EmailNotUnique
        }
        _ => AuthError::unexpected(e.to_string()),
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_email(&self, email: &str) -> AuthResult<User> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, role, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        user_from_row(&row)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<User> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, role, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        user_from_row(&row)
    }

    async fn insert(&self, user: NewUser) -> AuthResult<UserId> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(UserId::new(id))
    }

    async fn delete(&self, id: UserId) -> AuthResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn update_name_and_role(&self, id: UserId, name: &str, role: Role) -> AuthResult<()> {
        let result =
            sqlx::query("UPDATE users SET name = $1, role = $2, updated_at = now() WHERE id = $3")
                .bind(name)
                .bind(role.as_str())
                .bind(id.as_i64())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }
}
