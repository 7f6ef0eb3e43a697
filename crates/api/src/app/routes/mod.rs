use axum::{
    Router,
    routing::{get, post, put},
};

pub mod admin;
pub mod categories;
pub mod colors;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod sales;
pub mod system;

/// Routes reachable without a token: catalog reads, health, and login.
pub fn public_router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/products", get(products::list_products))
        .route("/products/:id", get(products::get_product))
        .route(
            "/products/category/:category_id",
            get(products::products_by_category),
        )
        .route("/categories", get(categories::list_categories))
        .route("/colors", get(colors::list_colors))
        .route("/stock_levels", get(inventory::stock_levels))
        .route("/admin/login", post(admin::login))
        .route("/admin/refresh", post(admin::refresh))
}

/// Routes behind the access-token middleware: every mutation, the sales and
/// order ledgers, and the live event stream.
pub fn protected_router() -> Router {
    Router::new()
        .route("/products", post(products::create_product))
        .route(
            "/products/:id",
            put(products::update_product).delete(products::delete_product),
        )
        .route("/categories", post(categories::create_category))
        .route(
            "/categories/:id",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route("/colors", post(colors::create_color))
        .route("/inventory", get(inventory::inventory))
        .route("/inventory/:id/stock", post(inventory::set_stock))
        .route("/reports/best_seller", get(inventory::best_seller))
        .route("/sales", post(sales::record_sale).get(sales::list_sales))
        .route("/sales/all", get(sales::query_sales))
        .route("/sales/:id", get(sales::sale_details))
        .route("/sales/product/:product_id", get(sales::sales_for_product))
        .route("/orders", post(orders::create_order).get(orders::list_orders))
        .route("/orders/:id/fulfill", post(orders::fulfill_order))
        .route("/admin/reset_password", post(admin::reset_password))
        .route("/stream", get(system::stream))
}
