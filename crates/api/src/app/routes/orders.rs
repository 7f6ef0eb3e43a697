use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};

use stockbeads_orders::NewOrder;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// POST /orders
///
/// Creating an order never touches stock; stock moves only on fulfill.
pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let order = match NewOrder::from_parts(
        body.customer_name,
        body.products_ordered,
        body.order_status,
        body.shipping_info,
        body.items,
    ) {
        Ok(o) => o,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.orders.create(&order).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": id, "message": "Order created" })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /orders
pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.orders.list().await {
        Ok(orders) => {
            Json(orders.iter().map(dto::order_json).collect::<Vec<_>>()).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

/// POST /orders/:id/fulfill
///
/// Decrements stock for every line item atomically; any short line aborts
/// the whole order.
pub async fn fulfill_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.orders.fulfill(id).await {
        Ok(()) => Json(serde_json::json!({ "message": "Order fulfilled" })).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
