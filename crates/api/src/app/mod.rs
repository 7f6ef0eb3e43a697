//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: shared store/notifier handles injected into handlers
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use stockbeads_auth::{JwtKeys, hash_password};
use stockbeads_events::Notifier;
use stockbeads_infra::{
    CategoryStore, ColorStore, OrderLedger, ProductStore, SalesLedger, StockAdjuster, UserStore,
    db,
};

use crate::config::AppConfig;
use crate::middleware::{self, AuthState};
use services::AppServices;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Connects the database, seeds the admin account, and layers auth over the
/// protected routes.
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let pool = db::connect(&config.database_url).await?;

    let keys = Arc::new(JwtKeys::new(config.jwt_secret.as_bytes()));
    let notifier = Notifier::default();

    let users = UserStore::new(pool.clone());
    let admin_hash = hash_password(&config.admin_password)?;
    users.ensure_admin(&config.admin_username, &admin_hash).await?;

    let services = Arc::new(AppServices {
        products: ProductStore::new(pool.clone()),
        categories: CategoryStore::new(pool.clone()),
        colors: ColorStore::new(pool.clone()),
        sales: SalesLedger::new(pool.clone(), notifier.clone()),
        orders: OrderLedger::new(pool.clone(), notifier.clone()),
        stock: StockAdjuster::new(pool.clone(), notifier.clone()),
        users,
        notifier,
        keys: keys.clone(),
    });

    let auth_state = AuthState { keys };

    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Ok(routes::public_router()
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(services))))
}
