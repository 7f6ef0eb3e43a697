//! `stockbeads-infra` — SQLite persistence for the inventory backend.
//!
//! One store per domain area, each holding a clone of the shared pool.
//! Stores that mutate stock also hold the notification fan-out handle and
//! publish only after their transaction has committed.

pub mod categories;
pub mod colors;
pub mod db;
pub mod error;
pub mod orders;
pub mod products;
pub mod sales;
pub mod stock;
pub mod users;


pub use categories::CategoryStore;
pub use colors::ColorStore;
pub use error::{StoreError, StoreResult};
pub use orders::OrderLedger;
pub use products::{BestSeller, InventoryRow, ProductStore, ProductWithCategory, StockLevel};
pub use sales::{ProductSalesReport, SaleDetails, SaleSummary, SaleWithProduct, SalesLedger};
pub use stock::StockAdjuster;
pub use users::{UserRecord, UserStore};
