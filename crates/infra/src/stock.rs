//! Stock adjuster: the single authoritative stock-mutation path.
//!
//! Both modes run as conditional updates inside a transaction so concurrent
//! mutations can never drive stock negative; events are published only after
//! commit.

use sqlx::SqlitePool;

use stockbeads_catalog::{Product, StockMode};
use stockbeads_events::{Notification, Notifier};

use crate::error::{StoreError, StoreResult};
use crate::products::fetch_product;

#[derive(Clone)]
pub struct StockAdjuster {
    pool: SqlitePool,
    notifier: Notifier,
}

impl StockAdjuster {
    pub fn new(pool: SqlitePool, notifier: Notifier) -> Self {
        Self { pool, notifier }
    }

    /// Apply a stock mutation and broadcast the resulting level.
    ///
    /// Always emits `stock_update` on success, plus `low_stock_alert` when
    /// the new level is below the product's own threshold.
    pub async fn set_stock(
        &self,
        product_id: i64,
        mode: StockMode,
        quantity: i64,
    ) -> StoreResult<Product> {
        if mode == StockMode::Absolute && quantity < 0 {
            return Err(StoreError::Invalid("stock must be non-negative".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let affected = match mode {
            StockMode::Delta => {
                sqlx::query(
                    "UPDATE products SET stock_quantity = stock_quantity + ?1 \
                     WHERE id = ?2 AND stock_quantity + ?1 >= 0",
                )
                .bind(quantity)
                .bind(product_id)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            }
            StockMode::Absolute => {
                sqlx::query("UPDATE products SET stock_quantity = ?1 WHERE id = ?2")
                    .bind(quantity)
                    .bind(product_id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected()
            }
        };

        if affected == 0 {
            let available: Option<i64> =
                sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = ?")
                    .bind(product_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            // Delta is the only mode that can fail with the row present.
            return Err(match available {
                None => StoreError::NotFound("Product"),
                Some(available) => StoreError::InsufficientStock {
                    available,
                    requested: -quantity,
                },
            });
        }

        let product = fetch_product(&mut tx, product_id)
            .await?
            .ok_or(StoreError::NotFound("Product"))?;
        tx.commit().await?;

        tracing::info!(product_id, stock = product.stock_quantity, "stock updated");
        self.notifier.publish(Notification::StockUpdate {
            id: product.id,
            name: product.name.clone(),
            stock: product.stock_quantity,
        });
        if product.is_low_stock() {
            self.notifier.publish(Notification::low_stock(
                product.id,
                &product.name,
                product.stock_quantity,
            ));
        }

        Ok(product)
    }
}
