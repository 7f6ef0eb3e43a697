//! Admin identity routes: login, token refresh, password reset.

use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use stockbeads_auth::{TokenKind, hash_password, verify_password};
use stockbeads_core::DomainError;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AuthContext;

/// POST /admin/login
///
/// Unknown username and wrong password are indistinguishable on the wire.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let username = match body.username {
        Some(u) => u,
        None => return errors::domain_error_to_response(DomainError::missing_field("username")),
    };
    let password = match body.password {
        Some(p) => p,
        None => return errors::domain_error_to_response(DomainError::missing_field("password")),
    };

    let user = match services.users.find_by_username(&username).await {
        Ok(user) => user,
        Err(e) => return errors::store_error_to_response(e),
    };

    let user = match user {
        Some(user) if verify_password(&password, &user.password_hash) => user,
        _ => return errors::json_error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    };

    match services.keys.issue_pair(&user.username, &user.role, Utc::now()) {
        Ok(pair) => {
            tracing::info!(username = %user.username, "login succeeded");
            Json(serde_json::json!({
                "access_token": pair.access_token,
                "refresh_token": pair.refresh_token,
                "role": user.role,
            }))
            .into_response()
        }
        Err(e) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// POST /admin/refresh
///
/// Exchanges a refresh token for a fresh access token. Access tokens are not
/// accepted here.
pub async fn refresh(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RefreshRequest>,
) -> axum::response::Response {
    let token = match body.refresh_token {
        Some(t) => t,
        None => {
            return errors::domain_error_to_response(DomainError::missing_field("refresh_token"));
        }
    };

    let claims = match services.keys.decode(&token, TokenKind::Refresh) {
        Ok(claims) => claims,
        Err(_) => return errors::json_error(StatusCode::UNAUTHORIZED, "Invalid refresh token"),
    };

    match services
        .keys
        .issue_access(&claims.sub, &claims.role, Utc::now())
    {
        Ok(access_token) => {
            Json(serde_json::json!({ "access_token": access_token })).into_response()
        }
        Err(e) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// POST /admin/reset_password
///
/// Resets the caller's own password unless a username is given explicitly.
pub async fn reset_password(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::ResetPasswordRequest>,
) -> axum::response::Response {
    let new_password = match body.new_password {
        Some(p) if !p.is_empty() => p,
        _ => {
            return errors::domain_error_to_response(DomainError::missing_field("new_password"));
        }
    };
    let username = body.username.unwrap_or_else(|| ctx.username().to_string());

    let hash = match hash_password(&new_password) {
        Ok(h) => h,
        Err(e) => return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    match services.users.set_password(&username, &hash).await {
        Ok(()) => {
            tracing::info!(%username, "password reset");
            Json(serde_json::json!({ "message": "Password updated" })).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
