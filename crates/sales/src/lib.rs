//! Sales domain module.
//!
//! Business rules for recording and querying sales, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod filter;
pub mod sale;

pub use filter::SaleFilter;
pub use sale::{NewSale, profit, unit_price};
