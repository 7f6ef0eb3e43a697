//! Request DTOs and JSON mapping helpers.
//!
//! Request fields are optional at the wire level; required-field checks live
//! in the domain constructors so the `Missing field: x` messages stay in one
//! place.

use serde::Deserialize;
use serde_json::{Value, json};

use stockbeads_catalog::{Category, Color, StockMode};
use stockbeads_infra::{
    BestSeller, InventoryRow, ProductSalesReport, ProductWithCategory, SaleDetails, SaleSummary,
    SaleWithProduct, StockLevel,
};
use stockbeads_orders::{Order, OrderItem};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub size: Option<String>,
    pub stock_quantity: Option<i64>,
    pub selling_price: Option<f64>,
    pub low_stock_threshold: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateColorRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub product_id: Option<i64>,
    pub quantity_sold: Option<i64>,
    pub total_price: Option<f64>,
    pub payment_method: Option<String>,
    pub sale_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: Option<String>,
    pub products_ordered: Option<Value>,
    pub order_status: Option<String>,
    pub shipping_info: Option<String>,
    pub items: Option<Vec<OrderItem>>,
}

#[derive(Debug, Deserialize)]
pub struct StockMutationRequest {
    pub mode: Option<StockMode>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub username: Option<String>,
    pub new_password: Option<String>,
}

/// Query string for the filtered sales listing.
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub product_id: Option<i64>,
    pub payment_method: Option<String>,
    pub sale_status: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn product_json(p: &ProductWithCategory) -> Value {
    json!({
        "id": p.product.id,
        "name": p.product.name,
        "category_id": p.product.category_id,
        "category": p.category_name,
        "size": p.product.size,
        "stock_quantity": p.product.stock_quantity,
        "selling_price": p.product.selling_price,
        "low_stock_threshold": p.product.low_stock_threshold,
    })
}

pub fn category_json(c: &Category) -> Value {
    json!({
        "id": c.id,
        "name": c.name,
        "description": c.description,
        "created_at": c.created_at.to_rfc3339(),
        "updated_at": c.updated_at.to_rfc3339(),
    })
}

pub fn color_json(c: &Color) -> Value {
    json!({
        "id": c.id,
        "name": c.name,
        "created_at": c.created_at.to_rfc3339(),
        "updated_at": c.updated_at.to_rfc3339(),
    })
}

pub fn sale_summary_json(s: &SaleSummary) -> Value {
    json!({
        "id": s.id,
        "product_name": s.product_name,
        "quantity": s.quantity,
        "total_price": s.total_price,
        "sale_date": s.sale_date.to_rfc3339(),
    })
}

pub fn sale_with_product_json(s: &SaleWithProduct) -> Value {
    json!({
        "id": s.id,
        "sale_date": s.sale_date.to_rfc3339(),
        "quantity_sold": s.quantity_sold,
        "total_price": s.total_price,
        "payment_method": s.payment_method,
        "sale_status": s.sale_status,
        "unit_price": s.unit_price,
        "profit": s.profit,
        "product": {
            "id": s.product_id,
            "name": s.product_name,
            "category_id": s.category_id,
            "category": s.category_name,
            "selling_price": s.selling_price,
            "stock_quantity": s.stock_quantity,
        },
    })
}

pub fn sale_details_json(s: &SaleDetails) -> Value {
    json!({
        "sale_id": s.sale_id,
        "sale_date": s.sale_date.to_rfc3339(),
        "quantity_sold": s.quantity_sold,
        "total_price": s.total_price,
        "payment_method": s.payment_method,
        "sale_status": s.sale_status,
        "unit_price": s.unit_price,
        "profit": s.profit,
        "product": {
            "id": s.product.id,
            "name": s.product.name,
            "category_id": s.product.category_id,
            "size": s.product.size,
            "selling_price": s.product.selling_price,
            "stock_quantity": s.product.stock_quantity,
        },
    })
}

pub fn product_sales_report_json(r: &ProductSalesReport) -> Value {
    json!({
        "product_id": r.product_id,
        "product_name": r.product_name,
        "total_units_sold": r.total_units_sold,
        "total_revenue": r.total_revenue,
        "sales": r.sales.iter().map(|s| json!({
            "id": s.id,
            "quantity_sold": s.quantity_sold,
            "total_price": s.total_price,
            "payment_method": s.payment_method,
            "sale_status": s.sale_status,
            "sale_date": s.sale_date.to_rfc3339(),
        })).collect::<Vec<_>>(),
    })
}

pub fn order_json(o: &Order) -> Value {
    json!({
        "id": o.id,
        "customer_name": o.customer_name,
        "order_status": o.order_status,
        "order_date": o.order_date.to_rfc3339(),
        "shipping_info": o.shipping_info,
        "products_ordered": o.products_ordered,
        "items": o.items,
    })
}

pub fn inventory_row_json(r: &InventoryRow) -> Value {
    json!({
        "id": r.id,
        "name": r.name,
        "stock_quantity": r.stock_quantity,
    })
}

pub fn stock_level_json(r: &StockLevel) -> Value {
    json!({
        "name": r.name,
        "category": r.category,
        "stock_quantity": r.stock_quantity,
    })
}

pub fn best_seller_json(b: &BestSeller) -> Value {
    json!({
        "name": b.name,
        "category": b.category,
        "cumulative_price": b.cumulative_price,
        "quantities_sold": b.quantities_sold,
        "stock_quantity": b.stock_quantity,
    })
}
