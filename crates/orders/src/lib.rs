//! Customer orders domain module.

pub mod order;

pub use order::{NewOrder, Order, OrderItem, STATUS_FULFILLED, STATUS_PENDING};
