//! Change-notification model and fan-out.
//!
//! Mutations in the inventory publish notifications to all currently
//! connected listeners. Delivery is best-effort and at-most-once; nothing is
//! persisted or retried for listeners that are disconnected.

pub mod notification;
pub mod notifier;

pub use notification::Notification;
pub use notifier::{Envelope, Notifier};
