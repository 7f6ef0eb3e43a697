use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    response::IntoResponse,
};

use stockbeads_core::DomainError;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// GET /inventory
pub async fn inventory(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products.inventory().await {
        Ok(rows) => Json(rows.iter().map(dto::inventory_row_json).collect::<Vec<_>>())
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /stock_levels
pub async fn stock_levels(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products.stock_levels().await {
        Ok(rows) => Json(rows.iter().map(dto::stock_level_json).collect::<Vec<_>>())
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// POST /inventory/:id/stock
///
/// The single stock-mutation endpoint: `{"mode": "delta"|"absolute",
/// "quantity": n}`. Every successful call broadcasts the new level.
pub async fn set_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::StockMutationRequest>,
) -> axum::response::Response {
    let mode = match body.mode {
        Some(mode) => mode,
        None => return errors::domain_error_to_response(DomainError::missing_field("mode")),
    };
    let quantity = match body.quantity {
        Some(q) => q,
        None => return errors::domain_error_to_response(DomainError::missing_field("quantity")),
    };

    match services.stock.set_stock(id, mode, quantity).await {
        Ok(product) => Json(serde_json::json!({
            "message": "Stock updated",
            "id": product.id,
            "stock_quantity": product.stock_quantity,
        }))
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /reports/best_seller
pub async fn best_seller(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products.best_seller().await {
        Ok(Some(best)) => Json(dto::best_seller_json(&best)).into_response(),
        Ok(None) => Json(serde_json::json!({ "message": "No sales recorded yet" }))
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
