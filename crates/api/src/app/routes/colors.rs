use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use stockbeads_catalog::NewColor;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_colors(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.colors.list().await {
        Ok(colors) => {
            Json(colors.iter().map(dto::color_json).collect::<Vec<_>>()).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_color(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateColorRequest>,
) -> axum::response::Response {
    let color = match NewColor::from_parts(body.name) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.colors.create(&color).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": id, "message": "Color created" })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
