//! Connection lifecycle pump.
//!
//! One pump task per hub reads the transport's lifecycle stream and, for
//! each event, updates the status flags (inside the render scheduler, since
//! views observe them) and republishes the matching application-wide
//! notification. Transitions to connected additionally flush the pending
//! outbound queue.
//!
//! ```text
//!   transport lifecycle ──► pump ──► status flags (via scheduler)
//!                               ├──► NotificationBus
//!                               └──► pending-queue flush (on connected)
//! ```

// Rust guideline compliant 2026-02

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::events::{HubNotification, NotificationBus};
use crate::scheduler::RenderScheduler;
use crate::status::ConnectionStatus;
use crate::transport::{ChannelProxy, ConnectionState, LifecycleEvent};

use super::pending::PendingCalls;

/// Everything the pump task needs, cloned out of the hub at spawn time.
pub(crate) struct LifecyclePump {
    pub status: Arc<ConnectionStatus>,
    pub bus: Arc<NotificationBus>,
    pub scheduler: Arc<dyn RenderScheduler>,
    pub proxy: Arc<dyn ChannelProxy>,
    pub pending: Arc<PendingCalls>,
}

/// Run the pump until the transport drops its lifecycle sender.
pub(crate) async fn run(pump: LifecyclePump, mut events: broadcast::Receiver<LifecycleEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => handle_event(&pump, event).await,
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                log::warn!("[Hub] lifecycle receiver lagged, {missed} event(s) skipped");
            }
            Err(broadcast::error::RecvError::Closed) => {
                log::debug!("[Hub] transport lifecycle stream ended");
                break;
            }
        }
    }
}

async fn handle_event(pump: &LifecyclePump, event: LifecycleEvent) {
    match event {
        LifecycleEvent::StateChanged { previous, new } => {
            log::debug!("[Hub] state changed: {previous} -> {new}");

            let reconnecting = new == ConnectionState::Reconnecting;
            let disconnected = new == ConnectionState::Disconnected;
            let status = Arc::clone(&pump.status);
            pump.scheduler
                .run_and_flush(Box::new(move || status.set(reconnecting, disconnected)));

            pump.bus.publish(HubNotification::Change { previous, new });

            if new == ConnectionState::Connected {
                flush_pending(&pump.proxy, &pump.pending).await;
            }
        }
        LifecycleEvent::Reconnecting => pump.bus.publish(HubNotification::Reconnecting),
        LifecycleEvent::Reconnected => pump.bus.publish(HubNotification::Reconnected),
        LifecycleEvent::Disconnected => pump.bus.publish(HubNotification::Disconnected),
        LifecycleEvent::Error { message, detail } => {
            log::warn!("[Hub] transport error: {message}");
            pump.bus.publish(HubNotification::Error { message, detail });
        }
    }
}

/// Replay every pending call against the proxy, in capture order.
///
/// Shared by the pump (connected transitions) and the deferred-start path in
/// [`Hub::send`](super::Hub::send); the atomic drain keeps each call to a
/// single replay whichever path gets there first.
pub(crate) async fn flush_pending(proxy: &Arc<dyn ChannelProxy>, pending: &PendingCalls) {
    let calls = pending.drain();
    if calls.is_empty() {
        return;
    }

    log::debug!("[Hub] flushing {} pending call(s)", calls.len());
    for call in calls {
        if let Err(err) = proxy.invoke(&call.method, call.args).await {
            // Non-fatal: the transport surfaces its own error event
            log::warn!("[Hub] deferred invoke '{}' failed: {err}", call.method);
        }
    }
}
