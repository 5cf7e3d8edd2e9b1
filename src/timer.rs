//! Cancelable delayed delivery of form events
//!
//! Timers never call into the controller; they deliver the event back
//! through the controller's channel so all state changes stay on the
//! main control flow.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::form::FormEvent;

/// Scheduling seam used by the controller for debounce and message
/// expiry delays
pub trait TimerService {
    /// Deliver `event` after `delay`. Dropping or canceling the handle
    /// stops the delivery if it has not happened yet.
    fn schedule(&mut self, delay: Duration, event: FormEvent) -> TimerHandle;
}

/// Timer service backed by the tokio runtime
pub struct TokioTimers {
    events: UnboundedSender<FormEvent>,
}

impl TokioTimers {
    pub fn new(events: UnboundedSender<FormEvent>) -> Self {
        Self { events }
    }
}

impl TimerService for TokioTimers {
    fn schedule(&mut self, delay: Duration, event: FormEvent) -> TimerHandle {
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may already be gone during teardown
            let _ = events.send(event);
        });
        TimerHandle { task }
    }
}

/// Handle to a scheduled delivery; aborts the delivery when canceled
/// or dropped
pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
