//! Catalog domain module: products, categories, colors.
//!
//! Pure domain types and validation (no IO, no HTTP, no storage).

pub mod category;
pub mod color;
pub mod product;
pub mod stock;

pub use category::{Category, CategoryPatch, NewCategory};
pub use color::{Color, NewColor};
pub use product::{DEFAULT_LOW_STOCK_THRESHOLD, NewProduct, Product, ProductPatch};
pub use stock::StockMode;
