//! Admin user store. Passwords arrive here already hashed.

use sqlx::{Row, SqlitePool};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> StoreResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT id, username, password, role FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(match row {
            Some(row) => Some(UserRecord {
                id: row.try_get("id").map_err(StoreError::from)?,
                username: row.try_get("username").map_err(StoreError::from)?,
                password_hash: row.try_get("password").map_err(StoreError::from)?,
                role: row.try_get("role").map_err(StoreError::from)?,
            }),
            None => None,
        })
    }

    /// Seed the admin account on startup. Does nothing when the username is
    /// already taken, so an existing password is never overwritten.
    pub async fn ensure_admin(&self, username: &str, password_hash: &str) -> StoreResult<()> {
        let result = sqlx::query(
            "INSERT INTO users (username, password, role) VALUES (?, ?, 'admin') \
             ON CONFLICT(username) DO NOTHING",
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!(username, "admin user created");
        }
        Ok(())
    }

    pub async fn set_password(&self, username: &str, password_hash: &str) -> StoreResult<()> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE username = ?")
            .bind(password_hash)
            .bind(username)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("User"));
        }
        Ok(())
    }
}
