use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockbeads_core::DomainError;
use stockbeads_infra::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound(_) => json_error(StatusCode::NOT_FOUND, err.to_string()),
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, msg),
        StoreError::Invalid(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        StoreError::InsufficientStock { available, requested } => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "Insufficient stock",
                "available": available,
                "requested": requested,
            })),
        )
            .into_response(),
        StoreError::Database(e) => {
            tracing::error!(error = %e, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({ "error": "Database error", "details": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) | DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::BAD_REQUEST, msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, msg),
    }
}

/// Standard error body: `{"error": message}`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}
