//! Change-notifying value holder
//!
//! Holds a value and reports every distinct assignment to its listeners as
//! `(new, previous)`. Assigning a value equal to the current one is silent.

use std::fmt;

/// Listener receiving `(current, previous)`; `previous` is `None` only for
/// the construction event
pub type ChangeListener<T> = Box<dyn FnMut(&T, Option<&T>)>;

/// Equality-compared value holder
///
/// ## Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use canopy_domain::entities::Notifier;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = seen.clone();
/// let mut health = Notifier::with_listener(100, move |now: &i32, before: Option<&i32>| {
///     sink.borrow_mut().push((*now, before.copied()));
/// });
///
/// health.set(100);
/// health.set(80);
/// assert_eq!(*seen.borrow(), vec![(100, None), (80, Some(100))]);
/// ```
pub struct Notifier<T> {
    value: T,
    listeners: Vec<ChangeListener<T>>,
}

impl<T: PartialEq> Notifier<T> {
    /// Create a notifier without listeners
    ///
    /// The construction event has no audience; use
    /// [`with_listener`](Self::with_listener) to observe it.
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            listeners: Vec::new(),
        }
    }

    /// Create a notifier and report `(initial, None)` to `listener`
    pub fn with_listener<F>(initial: T, listener: F) -> Self
    where
        F: FnMut(&T, Option<&T>) + 'static,
    {
        let mut notifier = Self::new(initial);
        notifier.listeners.push(Box::new(listener));
        if let Some(first) = notifier.listeners.first_mut() {
            first(&notifier.value, None);
        }
        notifier
    }

    /// Register a listener for subsequent changes
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&T, Option<&T>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Current value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Assign a value
    ///
    /// Returns `true` when the value changed and listeners were notified.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        let previous = std::mem::replace(&mut self.value, value);
        for listener in &mut self.listeners {
            listener(&self.value, Some(&previous));
        }
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
