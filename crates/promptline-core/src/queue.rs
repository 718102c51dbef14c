//! FIFO admission queue for prompt executions.
//!
//! Every request is admitted synchronously, at call time, and chained behind
//! the completion handle of the request admitted before it. A request's turn
//! ends when its [`Admission`] is dropped, whether it resolved, failed, or
//! was cancelled, so one bad execution never blocks the ones behind it.

#![allow(clippy::disallowed_types, reason = "Synchronous locking only, never held across an await")]

use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::oneshot;

/// Serializes prompt executions in admission order.
#[derive(Debug, Default)]
pub struct PromptQueue {
    /// Completion handle of the most recently admitted request.
    tail: Mutex<Option<oneshot::Receiver<()>>>,
    next_ticket: AtomicU64,
}

impl PromptQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a request behind everything admitted so far.
    pub fn admit(&self) -> Admission {
        let (done, handle) = oneshot::channel();
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);

        let previous = self.tail.lock().unwrap_or_else(PoisonError::into_inner).replace(handle);

        tracing::debug!(ticket, "prompt admitted");
        Admission { ticket, previous, _done: done }
    }
}

/// A place in the queue. Dropping it hands the turn to the next request.
#[derive(Debug)]
pub struct Admission {
    ticket: u64,
    previous: Option<oneshot::Receiver<()>>,
    _done: oneshot::Sender<()>,
}

impl Admission {
    /// Position in admission order, starting at 0.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Wait until every earlier admission has been dropped.
    pub async fn wait_turn(&mut self) {
        if let Some(previous) = self.previous.take() {
            // Err means the earlier request is gone, which is all we wait for.
            let _ = previous.await;
        }
    }
}
