//! Transport collaborator seam.
//!
//! The adapter does not own a wire protocol, transport negotiation,
//! reconnection policy, or message framing - all of that belongs to the
//! real-time transport library living behind the traits in this module. The
//! adapter only consumes: connection construction by endpoint path, named
//! channel-proxy construction, subscribe/unsubscribe by event name, outbound
//! invoke by method name and arguments, and a stream of lifecycle events.
//!
//! # Architecture
//!
//! ```text
//!   Connector ── open(endpoint, logging) ──► ClientConnection
//!                                                │
//!                                                ├── channel(name) ──► ChannelProxy
//!                                                │     subscribe / unsubscribe / invoke
//!                                                │
//!                                                └── lifecycle() ──► LifecycleEvent stream
//! ```
//!
//! Callback-style lifecycle registration in the wrapped library is rendered
//! here as a `tokio::sync::broadcast` subscription: each receiver observes
//! every event from its subscription point onward.

// Rust guideline compliant 2026-02

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};

/// Connection lifecycle state reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Initial connection attempt in progress.
    Connecting,
    /// Connected and ready.
    Connected,
    /// Connection lost; the transport is re-establishing it.
    Reconnecting,
    /// Not connected.
    Disconnected,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::Disconnected
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Reconnecting => write!(f, "reconnecting"),
            Self::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Lifecycle event emitted by the transport.
///
/// The transport emits a raw [`LifecycleEvent::StateChanged`] for every
/// transition, plus dedicated events for reconnecting/reconnected/
/// disconnected. Errors are non-terminal and may arrive alongside any
/// transition.
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    /// Raw state transition with previous and new state.
    StateChanged {
        /// State before the transition.
        previous: ConnectionState,
        /// State after the transition.
        new: ConnectionState,
    },
    /// The transport has begun re-establishing a lost connection.
    Reconnecting,
    /// The transport re-established the connection.
    Reconnected,
    /// The connection was lost and the transport gave up (until the next
    /// explicit start).
    Disconnected,
    /// Transport-level error. Non-terminal; the connection may recover.
    Error {
        /// Human-readable error description from the transport.
        message: String,
        /// Auxiliary payload the transport attached to the error, if any.
        detail: Option<serde_json::Value>,
    },
}

/// Errors reported by the transport collaborator.
#[derive(Debug, Clone)]
pub enum TransportError {
    /// Failed to open or start the connection.
    ConnectionFailed(String),
    /// Failed to dispatch an outbound call.
    InvokeFailed(String),
    /// The connection was closed.
    Closed,
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(msg) => write!(f, "Connection failed: {msg}"),
            Self::InvokeFailed(msg) => write!(f, "Invoke failed: {msg}"),
            Self::Closed => write!(f, "Connection closed"),
        }
    }
}

impl std::error::Error for TransportError {}

/// One logical session to a remote endpoint.
///
/// Implementors own the socket, the reconnection/backoff policy, and the
/// framing. The adapter holds exactly one of these per configured hub name
/// for the lifetime of the process.
#[async_trait]
pub trait ClientConnection: Send + Sync {
    /// Start the connection, resolving once it reaches
    /// [`ConnectionState::Connected`].
    ///
    /// Must be join-idempotent: concurrent callers while an attempt is in
    /// flight await the same attempt rather than starting another.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ConnectionFailed`] if the attempt fails.
    async fn start(&self) -> Result<(), TransportError>;

    /// Current lifecycle state.
    fn state(&self) -> ConnectionState;

    /// Construct (or return) the named channel proxy for this connection.
    fn channel(&self, name: &str) -> Arc<dyn ChannelProxy>;

    /// Subscribe to the lifecycle event stream.
    ///
    /// Each receiver observes every event emitted after subscription.
    fn lifecycle(&self) -> broadcast::Receiver<LifecycleEvent>;
}

/// A named sub-endpoint of a connection carrying tagged messages.
#[async_trait]
pub trait ChannelProxy: Send + Sync {
    /// Subscribe to messages tagged `event`, returning the receiving half.
    ///
    /// Multiple subscriptions to the same event each get their own receiver.
    fn subscribe(&self, event: &str) -> mpsc::Receiver<Vec<serde_json::Value>>;

    /// Drop every subscription for `event`. Receivers observe end-of-stream.
    fn unsubscribe(&self, event: &str);

    /// Dispatch an outbound call tagged `method` with positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvokeFailed`] if the dispatch fails, or
    /// [`TransportError::Closed`] if the connection is gone.
    async fn invoke(&self, method: &str, args: Vec<serde_json::Value>) -> Result<(), TransportError>;
}

/// Connection construction by endpoint path.
pub trait Connector: Send + Sync {
    /// Open a connection against `endpoint` with the transport's diagnostic
    /// logging set to `logging`.
    ///
    /// Opening is cheap; implementors spawn their socket machinery in the
    /// background and report readiness through
    /// [`ClientConnection::start`] and the lifecycle stream.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ConnectionFailed`] if the endpoint is
    /// unusable (malformed path, unsupported scheme).
    fn open(&self, endpoint: &str, logging: bool)
        -> Result<Arc<dyn ClientConnection>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_default_is_disconnected() {
        assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ConnectionState::Reconnecting.to_string(), "reconnecting");
        assert_eq!(ConnectionState::Connected.to_string(), "connected");
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::ConnectionFailed("host unreachable".to_string());
        assert_eq!(err.to_string(), "Connection failed: host unreachable");
        assert_eq!(TransportError::Closed.to_string(), "Connection closed");
    }
}
