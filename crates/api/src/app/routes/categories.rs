use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};

use stockbeads_catalog::{CategoryPatch, NewCategory};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.categories.list().await {
        Ok(categories) => Json(
            categories.iter().map(dto::category_json).collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCategoryRequest>,
) -> axum::response::Response {
    let category = match NewCategory::from_parts(body.name, body.description) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.categories.create(&category).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": id, "message": "Category created" })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(patch): Json<CategoryPatch>,
) -> axum::response::Response {
    match services.categories.update(id, &patch).await {
        Ok(category) => Json(dto::category_json(&category)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.categories.delete(id).await {
        Ok(()) => Json(serde_json::json!({ "message": "Category deleted" })).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
