//! `stockbeads-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod pagination;

pub use error::{DomainError, DomainResult};
pub use pagination::{DEFAULT_PER_PAGE, MAX_PER_PAGE, PageInfo, PageParams};
