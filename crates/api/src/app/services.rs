use std::sync::Arc;

use stockbeads_auth::JwtKeys;
use stockbeads_events::Notifier;
use stockbeads_infra::{
    CategoryStore, ColorStore, OrderLedger, ProductStore, SalesLedger, StockAdjuster, UserStore,
};

/// Shared handles for route handlers, injected as an Extension.
///
/// Every store clones the same pool; the mutating ones also share the
/// notifier so listeners see all stock changes on one stream.
#[derive(Clone)]
pub struct AppServices {
    pub products: ProductStore,
    pub categories: CategoryStore,
    pub colors: ColorStore,
    pub sales: SalesLedger,
    pub orders: OrderLedger,
    pub stock: StockAdjuster,
    pub users: UserStore,
    pub notifier: Notifier,
    pub keys: Arc<JwtKeys>,
}
