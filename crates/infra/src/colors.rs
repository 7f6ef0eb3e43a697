//! Color store.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use stockbeads_catalog::{Color, NewColor};

use crate::error::{StoreError, StoreResult};

#[derive(Clone)]
pub struct ColorStore {
    pool: SqlitePool,
}

impl ColorStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> StoreResult<Vec<Color>> {
        let rows =
            sqlx::query("SELECT id, name, created_at, updated_at FROM colors ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        rows.iter()
            .map(|row| {
                Ok(Color {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
                    updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(StoreError::from)
    }

    pub async fn create(&self, color: &NewColor) -> StoreResult<i64> {
        let now = Utc::now();
        let result = sqlx::query("INSERT INTO colors (name, created_at, updated_at) VALUES (?, ?, ?)")
            .bind(&color.name)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }
}
