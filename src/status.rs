//! Derived connection status.
//!
//! A read-only view over the connection's lifecycle state, exposed to views
//! that want boolean predicates rather than the raw state enum. Mutated only
//! by the hub's lifecycle pump; callers never write it directly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Boolean predicates over the connection lifecycle.
///
/// The flags are mutually exclusive; `is_down` is the OR of the two negative
/// ones. Both flags clear exactly when the transport reports a transition to
/// connected.
#[derive(Debug, Default)]
pub struct ConnectionStatus {
    reconnecting: AtomicBool,
    disconnected: AtomicBool,
}

impl ConnectionStatus {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Neither reconnecting nor disconnected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        !self.reconnecting.load(Ordering::SeqCst) && !self.disconnected.load(Ordering::SeqCst)
    }

    /// The transport reported a disconnect.
    #[must_use]
    pub fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }

    /// The transport is re-establishing a lost connection.
    #[must_use]
    pub fn is_reconnecting(&self) -> bool {
        self.reconnecting.load(Ordering::SeqCst)
    }

    /// Disconnected or reconnecting.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.is_disconnected() || self.is_reconnecting()
    }

    /// Update both flags from a lifecycle transition.
    pub(crate) fn set(&self, reconnecting: bool, disconnected: bool) {
        self.reconnecting.store(reconnecting, Ordering::SeqCst);
        self.disconnected.store(disconnected, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_flags_clear() {
        let status = ConnectionStatus::default();
        assert!(status.is_connected());
        assert!(!status.is_down());
        assert!(!status.is_reconnecting());
        assert!(!status.is_disconnected());
    }

    #[test]
    fn test_reconnecting_implies_down() {
        let status = ConnectionStatus::default();
        status.set(true, false);
        assert!(status.is_reconnecting());
        assert!(status.is_down());
        assert!(!status.is_connected());
        assert!(!status.is_disconnected());
    }

    #[test]
    fn test_connected_transition_clears_both() {
        let status = ConnectionStatus::default();
        status.set(false, true);
        assert!(status.is_disconnected());

        status.set(false, false);
        assert!(status.is_connected());
        assert!(!status.is_down());
    }
}
