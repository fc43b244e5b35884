//! Validated state machine
//!
//! A machine holds exactly one state at all times. Candidate states are
//! vetted by the current state's [`Transition::can_transition_to`]; accepted
//! changes are reported to listeners as `(new, previous)`.

use std::fmt;

use tracing::trace;

use crate::entities::notifier::ChangeListener;
use crate::error::{Error, Result};

/// Transition rules of a state type
///
/// The default accepts every transition.
pub trait Transition {
    /// Whether the machine may move from `self` to `candidate`
    fn can_transition_to(&self, candidate: &Self) -> bool {
        let _ = candidate;
        true
    }
}

/// State machine over an equality-compared state type
pub struct StateMachine<S> {
    current: S,
    listeners: Vec<ChangeListener<S>>,
}

impl<S> StateMachine<S>
where
    S: Transition + PartialEq + fmt::Debug,
{
    /// Create a machine in `initial` without listeners
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            listeners: Vec::new(),
        }
    }

    /// Create a machine in `initial` and report `(initial, None)` to `listener`
    pub fn with_listener<F>(initial: S, listener: F) -> Self
    where
        F: FnMut(&S, Option<&S>) + 'static,
    {
        let mut machine = Self::new(initial);
        machine.listeners.push(Box::new(listener));
        if let Some(first) = machine.listeners.first_mut() {
            first(&machine.current, None);
        }
        machine
    }

    /// Register a listener for subsequent transitions
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&S, Option<&S>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Current state
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Request a transition to `candidate`
    ///
    /// Returns `Ok(false)` without notifying when `candidate` equals the
    /// current state, `Ok(true)` after an accepted transition, and
    /// [`Error::InvalidTransition`] when the current state rejects it. A
    /// rejected transition leaves the current state untouched.
    pub fn update(&mut self, candidate: S) -> Result<bool> {
        if self.current == candidate {
            return Ok(false);
        }
        if !self.current.can_transition_to(&candidate) {
            return Err(Error::invalid_transition(&self.current, &candidate));
        }
        trace!(from = ?self.current, to = ?candidate, "state transition");
        let previous = std::mem::replace(&mut self.current, candidate);
        for listener in &mut self.listeners {
            listener(&self.current, Some(&previous));
        }
        Ok(true)
    }
}

impl<S: fmt::Debug> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
