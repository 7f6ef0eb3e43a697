//! Product catalog store.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use stockbeads_catalog::{NewProduct, Product, ProductPatch};

use crate::error::{StoreError, StoreResult};

/// Product joined with its category name, as listings present it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWithCategory {
    pub product: Product,
    pub category_name: String,
}

/// Inventory snapshot row.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub id: i64,
    pub name: String,
    pub stock_quantity: i64,
}

/// Stock level row for the public report.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLevel {
    pub name: String,
    pub category: String,
    pub stock_quantity: i64,
}

/// Best-selling product aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSeller {
    pub name: String,
    pub category: String,
    pub cumulative_price: f64,
    pub quantities_sold: i64,
    pub stock_quantity: i64,
}

#[derive(Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

const PRODUCT_COLUMNS: &str =
    "id, name, category_id, size, stock_quantity, selling_price, low_stock_threshold";

impl ProductStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> StoreResult<Vec<ProductWithCategory>> {
        let rows = sqlx::query(
            "SELECT p.id, p.name, p.category_id, p.size, p.stock_quantity, p.selling_price, \
             p.low_stock_threshold, c.name AS category_name \
             FROM products p JOIN categories c ON c.id = p.category_id \
             ORDER BY p.id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(product_with_category_from_row).collect()
    }

    pub async fn get(&self, id: i64) -> StoreResult<Product> {
        let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(product_from_row(&row)?),
            None => Err(StoreError::NotFound("Product")),
        }
    }

    pub async fn create(&self, product: &NewProduct) -> StoreResult<i64> {
        let category: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
            .bind(product.category_id)
            .fetch_optional(&self.pool)
            .await?;
        if category.is_none() {
            return Err(StoreError::NotFound("Category"));
        }

        let result = sqlx::query(
            "INSERT INTO products (name, category_id, size, stock_quantity, selling_price, \
             low_stock_threshold) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(product.category_id)
        .bind(&product.size)
        .bind(product.stock_quantity)
        .bind(product.selling_price)
        .bind(product.low_stock_threshold)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Partial update: absent fields keep their stored values.
    ///
    /// Stock is deliberately out of reach here; the stock adjuster is the
    /// only writer of `stock_quantity` outside sale/order commits.
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> StoreResult<()> {
        let current = self.get(id).await?;
        let merged = patch.apply_to(&current);

        if merged.category_id != current.category_id {
            let category: Option<i64> =
                sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
                    .bind(merged.category_id)
                    .fetch_optional(&self.pool)
                    .await?;
            if category.is_none() {
                return Err(StoreError::NotFound("Category"));
            }
        }

        sqlx::query(
            "UPDATE products SET name = ?, category_id = ?, size = ?, \
             selling_price = ?, low_stock_threshold = ? WHERE id = ?",
        )
        .bind(&merged.name)
        .bind(merged.category_id)
        .bind(&merged.size)
        .bind(merged.selling_price)
        .bind(merged.low_stock_threshold)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a product; its sales go with it (FK cascade).
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Product"));
        }
        Ok(())
    }

    pub async fn by_category(&self, category_id: i64) -> StoreResult<Vec<ProductWithCategory>> {
        let category: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;
        if category.is_none() {
            return Err(StoreError::NotFound("Category"));
        }

        let rows = sqlx::query(
            "SELECT p.id, p.name, p.category_id, p.size, p.stock_quantity, p.selling_price, \
             p.low_stock_threshold, c.name AS category_name \
             FROM products p JOIN categories c ON c.id = p.category_id \
             WHERE p.category_id = ? ORDER BY p.id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(product_with_category_from_row).collect()
    }

    pub async fn inventory(&self) -> StoreResult<Vec<InventoryRow>> {
        let rows = sqlx::query("SELECT id, name, stock_quantity FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(InventoryRow {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    stock_quantity: row.try_get("stock_quantity")?,
                })
            })
            .collect()
    }

    pub async fn stock_levels(&self) -> StoreResult<Vec<StockLevel>> {
        let rows = sqlx::query(
            "SELECT p.name, c.name AS category, p.stock_quantity \
             FROM products p JOIN categories c ON c.id = p.category_id \
             ORDER BY p.id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(StockLevel {
                    name: row.try_get("name")?,
                    category: row.try_get("category")?,
                    stock_quantity: row.try_get("stock_quantity")?,
                })
            })
            .collect()
    }

    /// Product with the highest total quantity sold, or None when no sales
    /// have been recorded yet.
    pub async fn best_seller(&self) -> StoreResult<Option<BestSeller>> {
        let row = sqlx::query(
            "SELECT p.name, c.name AS category, p.stock_quantity, \
             SUM(s.quantity_sold) AS quantities_sold, SUM(s.total_price) AS cumulative_price \
             FROM sales s \
             JOIN products p ON p.id = s.product_id \
             JOIN categories c ON c.id = p.category_id \
             GROUP BY p.id ORDER BY quantities_sold DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(BestSeller {
                name: row.try_get("name")?,
                category: row.try_get("category")?,
                cumulative_price: row.try_get("cumulative_price")?,
                quantities_sold: row.try_get("quantities_sold")?,
                stock_quantity: row.try_get("stock_quantity")?,
            })),
            None => Ok(None),
        }
    }
}

pub(crate) fn product_from_row(row: &SqliteRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category_id: row.try_get("category_id")?,
        size: row.try_get("size")?,
        stock_quantity: row.try_get("stock_quantity")?,
        selling_price: row.try_get("selling_price")?,
        low_stock_threshold: row.try_get("low_stock_threshold")?,
    })
}

fn product_with_category_from_row(row: &SqliteRow) -> StoreResult<ProductWithCategory> {
    Ok(ProductWithCategory {
        product: product_from_row(row)?,
        category_name: row.try_get("category_name").map_err(StoreError::from)?,
    })
}

/// Load a product inside an open transaction.
pub(crate) async fn fetch_product(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
) -> StoreResult<Option<Product>> {
    let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(match row {
        Some(row) => Some(product_from_row(&row)?),
        None => None,
    })
}
