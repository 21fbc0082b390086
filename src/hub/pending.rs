//! Pending outbound call queue.
//!
//! Calls issued while the connection is not yet connected are captured here
//! and replayed, in order and exactly once each, when the connection comes
//! up. The queue is bounded; on overflow the oldest call is dropped with a
//! warning.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Maximum captured calls before the oldest is dropped.
const MAX_PENDING: usize = 128;

/// An outbound call captured while the connection was not ready.
#[derive(Debug, Clone)]
pub(crate) struct PendingCall {
    /// Method name on the remote channel.
    pub method: String,
    /// Positional arguments.
    pub args: Vec<serde_json::Value>,
}

/// Bounded FIFO of calls awaiting a connected transport.
#[derive(Debug, Default)]
pub(crate) struct PendingCalls {
    queue: Mutex<VecDeque<PendingCall>>,
}

impl PendingCalls {
    /// Capture a call.
    pub fn push(&self, call: PendingCall) {
        let mut queue = self.queue.lock().expect("pending queue mutex poisoned");
        if queue.len() >= MAX_PENDING {
            if let Some(dropped) = queue.pop_front() {
                log::warn!(
                    "[Hub] pending queue full, dropping oldest call '{}'",
                    dropped.method
                );
            }
        }
        queue.push_back(call);
    }

    /// Take every captured call, leaving the queue empty.
    ///
    /// The take is atomic, so concurrent flushers replay each call at most
    /// once between them.
    pub fn drain(&self) -> Vec<PendingCall> {
        let mut queue = self.queue.lock().expect("pending queue mutex poisoned");
        queue.drain(..).collect()
    }

    /// Number of captured calls.
    pub fn len(&self) -> usize {
        self.queue.lock().expect("pending queue mutex poisoned").len()
    }
}
