//! Application-wide connection notifications.
//!
//! The hub republishes every transport lifecycle transition as a
//! [`HubNotification`] on a [`NotificationBus`] scoped to that hub instance.
//! Subscribers register explicitly; there is no ambient global bus.

// Rust guideline compliant 2026-02

use tokio::sync::broadcast;

use crate::transport::ConnectionState;

/// Buffered notifications per subscriber before the slowest one lags.
const BUS_CAPACITY: usize = 64;

/// Connection notification republished by the hub.
#[derive(Debug, Clone)]
pub enum HubNotification {
    /// Raw state transition, carrying previous and new state.
    ///
    /// Emitted for every transition the transport reports, in addition to
    /// the dedicated variants below.
    Change {
        /// State before the transition.
        previous: ConnectionState,
        /// State after the transition.
        new: ConnectionState,
    },
    /// Transport-level error with the error text and auxiliary payload
    /// carried through unchanged. Non-fatal.
    Error {
        /// Error description from the transport.
        message: String,
        /// Auxiliary payload from the transport, if any.
        detail: Option<serde_json::Value>,
    },
    /// The connection was lost and the transport gave up.
    Disconnected,
    /// The transport re-established the connection.
    Reconnected,
    /// The transport has begun re-establishing the connection.
    Reconnecting,
}

impl HubNotification {
    /// Stable routing name for hosts that key handlers by string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Change { .. } => "connection:change",
            Self::Error { .. } => "connection:error",
            Self::Disconnected => "connection:disconnected",
            Self::Reconnected => "connection:reconnected",
            Self::Reconnecting => "connection:reconnecting",
        }
    }
}

/// Publish/subscribe bus for one hub's connection notifications.
///
/// Backed by `tokio::sync::broadcast`; each subscriber observes every
/// notification published after its subscription point. Publishing with no
/// subscribers is not an error.
#[derive(Debug)]
pub struct NotificationBus {
    tx: broadcast::Sender<HubNotification>,
}

impl NotificationBus {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Register a subscriber.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HubNotification> {
        self.tx.subscribe()
    }

    /// Publish a notification to all current subscribers.
    pub(crate) fn publish(&self, notification: HubNotification) {
        log::trace!("[Hub] notify {}", notification.name());
        // A send error only means nobody is listening
        let _ = self.tx.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_names() {
        let change = HubNotification::Change {
            previous: ConnectionState::Connecting,
            new: ConnectionState::Connected,
        };
        assert_eq!(change.name(), "connection:change");
        assert_eq!(HubNotification::Reconnecting.name(), "connection:reconnecting");
        assert_eq!(HubNotification::Reconnected.name(), "connection:reconnected");
        assert_eq!(HubNotification::Disconnected.name(), "connection:disconnected");

        let error = HubNotification::Error {
            message: "boom".to_string(),
            detail: None,
        };
        assert_eq!(error.name(), "connection:error");
    }

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let bus = NotificationBus::new();
        bus.publish(HubNotification::Disconnected);
    }

    #[tokio::test]
    async fn test_subscriber_receives_published() {
        let bus = NotificationBus::new();
        let mut rx = bus.subscribe();
        bus.publish(HubNotification::Reconnecting);

        let received = rx.recv().await.expect("notification");
        assert_eq!(received.name(), "connection:reconnecting");
    }
}
