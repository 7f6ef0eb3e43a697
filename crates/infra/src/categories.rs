//! Category store.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use stockbeads_catalog::{Category, CategoryPatch, NewCategory};

use crate::error::{StoreError, StoreResult};

#[derive(Clone)]
pub struct CategoryStore {
    pool: SqlitePool,
}

impl CategoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT id, name, description, created_at, updated_at \
             FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(category_from_row).collect()
    }

    pub async fn create(&self, category: &NewCategory) -> StoreResult<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO categories (name, description, created_at, updated_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::map_unique(e, "Category name must be unique"))?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update(&self, id: i64, patch: &CategoryPatch) -> StoreResult<Category> {
        let row = sqlx::query(
            "SELECT id, name, description, created_at, updated_at FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound("Category"))?;
        let current = category_from_row(&row)?;

        let name = patch.name.clone().unwrap_or(current.name);
        let description = patch.description.clone().unwrap_or(current.description);

        sqlx::query("UPDATE categories SET name = ?, description = ?, updated_at = ? WHERE id = ?")
            .bind(&name)
            .bind(&description)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::map_unique(e, "Category name must be unique"))?;

        let row = sqlx::query(
            "SELECT id, name, description, created_at, updated_at FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        category_from_row(&row)
    }

    /// Delete a category. Products referencing it keep it alive via the FK.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    StoreError::Conflict("Category has products and cannot be deleted".to_string())
                }
                _ => StoreError::Database(e),
            })?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Category"));
        }
        Ok(())
    }
}

fn category_from_row(row: &SqliteRow) -> StoreResult<Category> {
    Ok(Category {
        id: row.try_get("id").map_err(StoreError::from)?,
        name: row.try_get("name").map_err(StoreError::from)?,
        description: row.try_get("description").map_err(StoreError::from)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(StoreError::from)?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(StoreError::from)?,
    })
}
