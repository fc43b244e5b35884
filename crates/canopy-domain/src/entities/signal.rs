//! One-shot readiness signal
//!
//! A single-slot publish/subscribe primitive. Subscribers registered before
//! the signal fires are queued and invoked, in subscription order, the moment
//! it fires. Subscribers registered afterwards are invoked synchronously
//! inside [`ReadinessSignal::subscribe`]. Every subscriber runs at most once.
//!
//! ```text
//!   subscribe(a) ─┐
//!   subscribe(b) ─┼─► pending [a, b]
//!                 │
//!   fire() ───────┴─► a(), b()        ready = true
//!   subscribe(c) ────► c()            (already ready)
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;

/// Callback queued on a [`ReadinessSignal`]
pub type ReadyCallback = Box<dyn FnOnce()>;

/// One-shot readiness signal
///
/// Once fired the signal never reverts. Firing again is a no-op reported by
/// the `false` return value of [`fire`](Self::fire); callers choose whether
/// that is an error.
#[derive(Default)]
pub struct ReadinessSignal {
    ready: Cell<bool>,
    pending: RefCell<Vec<ReadyCallback>>,
}

impl ReadinessSignal {
    /// Create a signal that has not fired
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the signal has fired
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Number of subscribers still waiting for the signal
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Subscribe a callback
    ///
    /// Runs the callback immediately when the signal already fired, otherwise
    /// queues it behind earlier subscribers.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        if self.ready.get() {
            callback();
        } else {
            self.pending.borrow_mut().push(Box::new(callback));
        }
    }

    /// Fire the signal
    ///
    /// Returns `true` when this call flipped the signal to ready and drained
    /// the subscribers, `false` when it had already fired.
    pub fn fire(&self) -> bool {
        if self.ready.replace(true) {
            return false;
        }
        // Callbacks may subscribe again; the queue must not stay borrowed.
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        for callback in pending {
            callback();
        }
        true
    }
}

impl fmt::Debug for ReadinessSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessSignal")
            .field("ready", &self.ready.get())
            .field("pending", &self.pending_count())
            .finish()
    }
}
