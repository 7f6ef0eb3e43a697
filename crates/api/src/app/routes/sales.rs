use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};

use stockbeads_core::PageParams;
use stockbeads_sales::{NewSale, SaleFilter};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// POST /sales
///
/// Records the sale and decrements stock in one transaction; an oversell
/// returns 400 with the available quantity.
pub async fn record_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateSaleRequest>,
) -> axum::response::Response {
    let sale = match NewSale::from_parts(
        body.product_id,
        body.quantity_sold,
        body.total_price,
        body.payment_method,
        body.sale_status,
    ) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.sales.record(&sale).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "message": "Sale recorded", "sale_id": id })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /sales/all
///
/// Filtered and paginated history, newest first.
pub async fn query_sales(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::SalesQuery>,
) -> axum::response::Response {
    let filter = match SaleFilter::parse(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        query.product_id,
        query.payment_method,
        query.sale_status,
    ) {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let params = PageParams::clamped(query.page, query.per_page);

    match services.sales.query(&filter, params).await {
        Ok((sales, pagination)) => Json(serde_json::json!({
            "sales": sales.iter().map(dto::sale_with_product_json).collect::<Vec<_>>(),
            "pagination": pagination,
        }))
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /sales
pub async fn list_sales(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.sales.list().await {
        Ok(sales) => Json(sales.iter().map(dto::sale_summary_json).collect::<Vec<_>>())
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /sales/:id
pub async fn sale_details(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.sales.details(id).await {
        Ok(details) => Json(dto::sale_details_json(&details)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /sales/product/:product_id
pub async fn sales_for_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product_id): Path<i64>,
) -> axum::response::Response {
    match services.sales.for_product(product_id).await {
        Ok(report) => Json(dto::product_sales_report_json(&report)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
