//! Order ledger: customer orders and the explicit fulfill operation.
//!
//! Creating an order never touches stock; only `fulfill` decrements, and it
//! does so all-or-nothing across the order's line items.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use stockbeads_events::{Notification, Notifier};
use stockbeads_orders::{NewOrder, Order, OrderItem, STATUS_FULFILLED};

use crate::error::{StoreError, StoreResult};
use crate::products::fetch_product;

#[derive(Clone)]
pub struct OrderLedger {
    pool: SqlitePool,
    notifier: Notifier,
}

impl OrderLedger {
    pub fn new(pool: SqlitePool, notifier: Notifier) -> Self {
        Self { pool, notifier }
    }

    pub async fn create(&self, order: &NewOrder) -> StoreResult<i64> {
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query(
            "INSERT INTO orders (customer_name, order_status, order_date, shipping_info, \
             products_ordered) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&order.customer_name)
        .bind(&order.order_status)
        .bind(Utc::now())
        .bind(&order.shipping_info)
        .bind(order.products_ordered.to_string())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for item in &order.items {
            sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES (?, ?, ?)")
                .bind(order_id)
                .bind(item.product_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::map_foreign_key(e, "Product"))?;
        }

        tx.commit().await?;
        tracing::info!(order_id, items = order.items.len(), "order created");
        Ok(order_id)
    }

    pub async fn list(&self) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query(
            "SELECT id, customer_name, order_status, order_date, shipping_info, \
             products_ordered FROM orders ORDER BY order_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let item_rows = sqlx::query("SELECT order_id, product_id, quantity FROM order_items")
            .fetch_all(&self.pool)
            .await?;
        let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in &item_rows {
            let order_id: i64 = row.try_get("order_id").map_err(StoreError::from)?;
            items_by_order.entry(order_id).or_default().push(OrderItem {
                product_id: row.try_get("product_id").map_err(StoreError::from)?,
                quantity: row.try_get("quantity").map_err(StoreError::from)?,
            });
        }

        rows.iter()
            .map(|row| {
                let id: i64 = row.try_get("id")?;
                let raw: String = row.try_get("products_ordered")?;
                Ok(Order {
                    id,
                    customer_name: row.try_get("customer_name")?,
                    order_status: row.try_get("order_status")?,
                    order_date: row.try_get::<DateTime<Utc>, _>("order_date")?,
                    shipping_info: row.try_get("shipping_info")?,
                    products_ordered: serde_json::from_str(&raw)
                        .unwrap_or(Value::String(raw)),
                    items: items_by_order.remove(&id).unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(StoreError::from)
    }

    /// Decrement stock for every line item and mark the order fulfilled,
    /// as one transaction. Any insufficient line aborts the whole thing.
    pub async fn fulfill(&self, order_id: i64) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let status: Option<String> =
            sqlx::query_scalar("SELECT order_status FROM orders WHERE id = ?")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?;
        let status = status.ok_or(StoreError::NotFound("Order"))?;
        if status == STATUS_FULFILLED {
            return Err(StoreError::Conflict("Order already fulfilled".to_string()));
        }

        let items = sqlx::query(
            "SELECT product_id, quantity FROM order_items WHERE order_id = ?",
        )
        .bind(order_id)
        .fetch_all(&mut *tx)
        .await?;
        if items.is_empty() {
            return Err(StoreError::Invalid("Order has no line items".to_string()));
        }

        let mut touched = Vec::with_capacity(items.len());
        for item in &items {
            let product_id: i64 = item.try_get("product_id").map_err(StoreError::from)?;
            let quantity: i64 = item.try_get("quantity").map_err(StoreError::from)?;

            let affected = sqlx::query(
                "UPDATE products SET stock_quantity = stock_quantity - ?1 \
                 WHERE id = ?2 AND stock_quantity >= ?1",
            )
            .bind(quantity)
            .bind(product_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if affected == 0 {
                let available: Option<i64> =
                    sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = ?")
                        .bind(product_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                return Err(match available {
                    None => StoreError::NotFound("Product"),
                    Some(available) => StoreError::InsufficientStock {
                        available,
                        requested: quantity,
                    },
                });
            }

            let product = fetch_product(&mut tx, product_id)
                .await?
                .ok_or(StoreError::NotFound("Product"))?;
            touched.push(product);
        }

        sqlx::query("UPDATE orders SET order_status = ? WHERE id = ?")
            .bind(STATUS_FULFILLED)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(order_id, lines = touched.len(), "order fulfilled");
        for product in &touched {
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
        }

        Ok(())
    }
}
