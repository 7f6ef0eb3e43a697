//! Sales ledger: sale recording and sales history queries.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use stockbeads_catalog::Product;
use stockbeads_core::{PageInfo, PageParams};
use stockbeads_events::{Notification, Notifier};
use stockbeads_sales::{NewSale, SaleFilter, profit, unit_price};

use crate::error::{StoreError, StoreResult};
use crate::products::fetch_product;

/// Flat history row for the plain sales listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleSummary {
    pub id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: f64,
    pub sale_date: DateTime<Utc>,
}

/// Full detail view of a single sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDetails {
    pub sale_id: i64,
    pub sale_date: DateTime<Utc>,
    pub quantity_sold: i64,
    pub total_price: f64,
    pub payment_method: Option<String>,
    pub sale_status: String,
    pub unit_price: f64,
    pub profit: f64,
    pub product: Product,
}

/// One row of the filtered/paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleWithProduct {
    pub id: i64,
    pub sale_date: DateTime<Utc>,
    pub quantity_sold: i64,
    pub total_price: f64,
    pub payment_method: Option<String>,
    pub sale_status: String,
    pub unit_price: f64,
    pub profit: f64,
    pub product_id: i64,
    pub product_name: String,
    pub category_id: i64,
    pub category_name: String,
    pub selling_price: f64,
    pub stock_quantity: i64,
}

/// Per-product sales history with aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSalesReport {
    pub product_id: i64,
    pub product_name: String,
    pub total_units_sold: i64,
    pub total_revenue: f64,
    pub sales: Vec<SaleDetailsRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleDetailsRow {
    pub id: i64,
    pub quantity_sold: i64,
    pub total_price: f64,
    pub payment_method: Option<String>,
    pub sale_status: String,
    pub sale_date: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SalesLedger {
    pool: SqlitePool,
    notifier: Notifier,
}

impl SalesLedger {
    pub fn new(pool: SqlitePool, notifier: Notifier) -> Self {
        Self { pool, notifier }
    }

    /// Record a sale: conditional atomic stock decrement plus ledger insert,
    /// committed as one unit.
    ///
    /// The decrement is guarded by `stock_quantity >= quantity`, so two
    /// concurrent sales can never jointly exceed the available stock; the
    /// loser of the race observes zero affected rows and reports
    /// insufficient stock.
    pub async fn record(&self, sale: &NewSale) -> StoreResult<i64> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            "UPDATE products SET stock_quantity = stock_quantity - ?1 \
             WHERE id = ?2 AND stock_quantity >= ?1",
        )
        .bind(sale.quantity_sold)
        .bind(sale.product_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected == 0 {
            let available: Option<i64> =
                sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = ?")
                    .bind(sale.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return Err(match available {
                None => StoreError::NotFound("Product"),
                Some(available) => StoreError::InsufficientStock {
                    available,
                    requested: sale.quantity_sold,
                },
            });
        }

        let sale_id = sqlx::query(
            "INSERT INTO sales (product_id, quantity_sold, sale_date, total_price, \
             payment_method, sale_status) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(sale.product_id)
        .bind(sale.quantity_sold)
        .bind(Utc::now())
        .bind(sale.total_price)
        .bind(&sale.payment_method)
        .bind(&sale.sale_status)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let product = fetch_product(&mut tx, sale.product_id)
            .await?
            .ok_or(StoreError::NotFound("Product"))?;

        tx.commit().await?;

        tracing::info!(
            sale_id,
            product_id = product.id,
            quantity = sale.quantity_sold,
            remaining = product.stock_quantity,
            "sale recorded"
        );
        self.notifier.publish(Notification::SaleCompleted {
            id: sale_id,
            product_id: product.id,
            product_name: product.name.clone(),
            quantity_sold: sale.quantity_sold,
            total_price: sale.total_price,
            remaining_stock: product.stock_quantity,
        });
        if product.is_low_stock() {
            self.notifier.publish(Notification::low_stock(
                product.id,
                &product.name,
                product.stock_quantity,
            ));
        }

        Ok(sale_id)
    }

    pub async fn list(&self) -> StoreResult<Vec<SaleSummary>> {
        let rows = sqlx::query(
            "SELECT s.id, s.quantity_sold, s.total_price, s.sale_date, p.name AS product_name \
             FROM sales s JOIN products p ON p.id = s.product_id \
             ORDER BY s.sale_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(SaleSummary {
                    id: row.try_get("id")?,
                    product_name: row.try_get("product_name")?,
                    quantity: row.try_get("quantity_sold")?,
                    total_price: row.try_get("total_price")?,
                    sale_date: row.try_get("sale_date")?,
                })
            })
            .collect()
    }

    pub async fn details(&self, sale_id: i64) -> StoreResult<SaleDetails> {
        let row = sqlx::query(
            "SELECT id, product_id, quantity_sold, sale_date, total_price, payment_method, \
             sale_status FROM sales WHERE id = ?",
        )
        .bind(sale_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound("Sale"))?;

        let product_id: i64 = row.try_get("product_id").map_err(StoreError::from)?;
        let product_row =
            sqlx::query(
                "SELECT id, name, category_id, size, stock_quantity, selling_price, \
                 low_stock_threshold FROM products WHERE id = ?",
            )
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound("Associated product"))?;
        let product = crate::products::product_from_row(&product_row)?;

        let quantity_sold: i64 = row.try_get("quantity_sold").map_err(StoreError::from)?;
        let total_price: f64 = row.try_get("total_price").map_err(StoreError::from)?;

        Ok(SaleDetails {
            sale_id,
            sale_date: row.try_get("sale_date").map_err(StoreError::from)?,
            quantity_sold,
            total_price,
            payment_method: row.try_get("payment_method").map_err(StoreError::from)?,
            sale_status: row.try_get("sale_status").map_err(StoreError::from)?,
            unit_price: unit_price(total_price, quantity_sold),
            profit: profit(total_price, product.selling_price, quantity_sold),
            product,
        })
    }

    pub async fn for_product(&self, product_id: i64) -> StoreResult<ProductSalesReport> {
        let product_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM products WHERE id = ?")
                .bind(product_id)
                .fetch_optional(&self.pool)
                .await?;
        let product_name = product_name.ok_or(StoreError::NotFound("Product"))?;

        let rows = sqlx::query(
            "SELECT id, quantity_sold, total_price, payment_method, sale_status, sale_date \
             FROM sales WHERE product_id = ? ORDER BY sale_date DESC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let sales = rows
            .iter()
            .map(|row| {
                Ok(SaleDetailsRow {
                    id: row.try_get("id")?,
                    quantity_sold: row.try_get("quantity_sold")?,
                    total_price: row.try_get("total_price")?,
                    payment_method: row.try_get("payment_method")?,
                    sale_status: row.try_get("sale_status")?,
                    sale_date: row.try_get("sale_date")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let total_units_sold = sales.iter().map(|s| s.quantity_sold).sum();
        let total_revenue = sales.iter().map(|s| s.total_price).sum();

        Ok(ProductSalesReport {
            product_id,
            product_name,
            total_units_sold,
            total_revenue,
            sales,
        })
    }

    /// Filtered, paginated history ordered by most recent sale first.
    pub async fn query(
        &self,
        filter: &SaleFilter,
        params: PageParams,
    ) -> StoreResult<(Vec<SaleWithProduct>, PageInfo)> {
        let total_items: i64 = filtered(filter, "SELECT COUNT(*)")
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = filtered(
            filter,
            "SELECT s.id, s.sale_date, s.quantity_sold, s.total_price, s.payment_method, \
             s.sale_status, s.product_id, p.name AS product_name, p.category_id, \
             c.name AS category_name, p.selling_price, p.stock_quantity",
        );
        qb.push(" ORDER BY s.sale_date DESC LIMIT ")
            .push_bind(params.per_page())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let rows = qb.build().fetch_all(&self.pool).await?;
        let sales = rows
            .iter()
            .map(sale_with_product_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok((sales, PageInfo::new(total_items, params)))
    }
}

/// Shared FROM/WHERE clause for the filtered listing and its count.
fn filtered(filter: &SaleFilter, select: &str) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(select.to_string());
    qb.push(
        " FROM sales s \
         JOIN products p ON p.id = s.product_id \
         JOIN categories c ON c.id = p.category_id \
         WHERE 1 = 1",
    );
    if let Some(start) = filter.start {
        qb.push(" AND s.sale_date >= ").push_bind(start);
    }
    if let Some(end) = filter.end_exclusive {
        qb.push(" AND s.sale_date < ").push_bind(end);
    }
    if let Some(product_id) = filter.product_id {
        qb.push(" AND s.product_id = ").push_bind(product_id);
    }
    if let Some(payment_method) = &filter.payment_method {
        qb.push(" AND s.payment_method = ").push_bind(payment_method.clone());
    }
    if let Some(sale_status) = &filter.sale_status {
        qb.push(" AND s.sale_status = ").push_bind(sale_status.clone());
    }
    qb
}

fn sale_with_product_from_row(row: &SqliteRow) -> Result<SaleWithProduct, sqlx::Error> {
    let quantity_sold: i64 = row.try_get("quantity_sold")?;
    let total_price: f64 = row.try_get("total_price")?;
    let selling_price: f64 = row.try_get("selling_price")?;

    Ok(SaleWithProduct {
        id: row.try_get("id")?,
        sale_date: row.try_get("sale_date")?,
        quantity_sold,
        total_price,
        payment_method: row.try_get("payment_method")?,
        sale_status: row.try_get("sale_status")?,
        unit_price: unit_price(total_price, quantity_sold),
        profit: profit(total_price, selling_price, quantity_sold),
        product_id: row.try_get("product_id")?,
        product_name: row.try_get("product_name")?,
        category_id: row.try_get("category_id")?,
        category_name: row.try_get("category_name")?,
        selling_price,
        stock_quantity: row.try_get("stock_quantity")?,
    })
}
