//! Broadcast fan-out for change notifications.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::notification::Notification;

/// A published notification with its delivery identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub event_id: Uuid,
    #[serde(flatten)]
    pub notification: Notification,
}

/// Fan-out handle shared by every store that mutates stock.
///
/// Publishing is fire-and-forget: slow listeners may miss messages (bounded
/// channel, at-most-once) and a listener-free channel is not an error.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Envelope>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Broadcast to all currently connected listeners. Never fails the
    /// calling mutation.
    pub fn publish(&self, notification: Notification) {
        let kind = notification.kind();
        let envelope = Envelope {
            event_id: Uuid::now_v7(),
            notification,
        };
        match self.tx.send(envelope) {
            Ok(listeners) => {
                tracing::debug!(kind, listeners, "notification published");
            }
            Err(_) => {
                tracing::debug!(kind, "no listeners connected; notification dropped");
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Envelope> {
        self.tx.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fans_out_to_every_listener() {
        let notifier = Notifier::new(8);
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();

        notifier.publish(Notification::StockUpdate {
            id: 1,
            name: "Bead".to_string(),
            stock: 4,
        });

        let got_a = a.recv().await.unwrap();
        let got_b = b.recv().await.unwrap();
        assert_eq!(got_a.notification, got_b.notification);
        assert_eq!(got_a.notification.kind(), "stock_update");
    }

    #[tokio::test]
    async fn publishing_without_listeners_is_a_no_op() {
        let notifier = Notifier::new(8);
        notifier.publish(Notification::low_stock(1, "Bead", 0));

        // A listener that connects afterwards sees nothing: missed events
        // are not replayed.
        let mut late = notifier.subscribe();
        notifier.publish(Notification::StockUpdate {
            id: 1,
            name: "Bead".to_string(),
            stock: 9,
        });
        let got = late.recv().await.unwrap();
        assert_eq!(got.notification.kind(), "stock_update");
    }
}
