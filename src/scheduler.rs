//! Host update-cycle seam.
//!
//! UI hosts re-render views only when asked. Every externally-delivered
//! event (channel message, status flag change) runs inside
//! [`RenderScheduler::run_and_flush`] so that state observed by bound views
//! is mutated inside the host's update cycle, never outside it.

/// Capability to re-enter the host UI's update cycle.
pub trait RenderScheduler: Send + Sync {
    /// Run `work` inside the host's update cycle and flush pending view
    /// updates afterwards.
    fn run_and_flush(&self, work: Box<dyn FnOnce() + Send>);
}

/// Scheduler for headless hosts: runs the block inline, no flush step.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateScheduler;

impl RenderScheduler for ImmediateScheduler {
    fn run_and_flush(&self, work: Box<dyn FnOnce() + Send>) {
        work();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_scheduler_runs_inline() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        ImmediateScheduler.run_and_flush(Box::new(move || flag.store(true, Ordering::SeqCst)));
        assert!(ran.load(Ordering::SeqCst));
    }
}
