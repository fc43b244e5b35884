//! Provider capabilities
//!
//! A [`Provision<T>`] is one supplied value on a provider node together with
//! the [`ReadinessSignal`] announcing it. A node exposes its provisions through
//! a [`Provisions`] table, queried by exact type during resolution.
//!
//! ## Business Rules
//!
//! - A provision becomes ready once and stays ready for its whole lifetime
//! - Consumers must not read the value before the provision is ready
//! - The value may be replaced after readiness; consumers re-read on access

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use downcast_rs::{Downcast, impl_downcast};

use crate::constants::UNNAMED_NODE_LABEL;
use crate::entities::signal::ReadinessSignal;
use crate::error::{Error, Result};
use crate::value_objects::TypeKey;

/// Type-erased view of a [`Provision<T>`]
///
/// Lets the resolver and the provide step handle provisions of different
/// types uniformly. Typed access goes through `downcast_rc`.
pub trait ErasedProvision: Downcast {
    /// Key of the provided type
    fn key(&self) -> TypeKey;

    /// Whether the provision has been marked ready
    fn is_ready(&self) -> bool;

    /// Whether a value has been assigned
    fn has_value(&self) -> bool;

    /// Readiness signal consumers subscribe to
    fn signal(&self) -> &ReadinessSignal;

    /// Mark the provision ready, returning `false` when it already was
    fn mark_ready(&self) -> bool;
}
impl_downcast!(ErasedProvision);

/// Provider capability for a single type
pub struct Provision<T> {
    value: RefCell<Option<T>>,
    signal: ReadinessSignal,
}

impl<T: 'static> Provision<T> {
    /// Create an empty, unready provision
    pub fn new() -> Self {
        Self {
            value: RefCell::new(None),
            signal: ReadinessSignal::new(),
        }
    }

    /// Create an unready provision holding `value`
    pub fn holding(value: T) -> Self {
        Self {
            value: RefCell::new(Some(value)),
            signal: ReadinessSignal::new(),
        }
    }

    /// Assign or replace the supplied value
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = Some(value);
    }

    /// Assign the value and mark the provision ready
    ///
    /// Returns `false` when the provision was already ready; the value is
    /// still replaced in that case.
    pub fn provide_value(&self, value: T) -> bool {
        self.set(value);
        self.signal.fire()
    }

    /// Clone of the current value
    pub fn value(&self) -> Option<T>
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    /// Borrow the current value
    ///
    /// Calling [`set`](Self::set) on this provision from inside `f` panics.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.value.borrow().as_ref().map(f)
    }
}

impl<T: 'static> Default for Provision<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ErasedProvision for Provision<T> {
    fn key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn is_ready(&self) -> bool {
        self.signal.is_ready()
    }

    fn has_value(&self) -> bool {
        self.value.borrow().is_some()
    }

    fn signal(&self) -> &ReadinessSignal {
        &self.signal
    }

    fn mark_ready(&self) -> bool {
        self.signal.fire()
    }
}

impl<T: 'static> fmt::Debug for Provision<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provision")
            .field("type", &TypeKey::of::<T>())
            .field("has_value", &self.has_value())
            .field("signal", &self.signal)
            .finish()
    }
}

/// Ordered table of the provisions a node exposes
///
/// Iteration follows insertion order, which is also the order in which
/// `provide` marks the provisions ready.
///
/// ## Example
///
/// ```rust
/// use canopy_domain::entities::Provisions;
///
/// #[derive(Clone)]
/// struct Config { name: String }
///
/// let provisions = Provisions::named("AppRoot").with::<Config>();
/// provisions.set(Config { name: "x".into() }).unwrap();
/// assert!(provisions.get::<Config>().is_some());
/// assert!(provisions.set(42_u32).is_err());
/// ```
pub struct Provisions {
    owner: String,
    entries: Vec<Rc<dyn ErasedProvision>>,
}

impl Provisions {
    /// Create an empty table
    pub fn new() -> Self {
        Self::named(UNNAMED_NODE_LABEL)
    }

    /// Create an empty table labelled with its owner, used in error messages
    pub fn named<S: Into<String>>(owner: S) -> Self {
        Self {
            owner: owner.into(),
            entries: Vec::new(),
        }
    }

    /// Declare a provision for `T`
    #[must_use]
    pub fn with<T: 'static>(mut self) -> Self {
        self.insert::<T>();
        self
    }

    /// Declare a provision for `T` holding an initial value
    #[must_use]
    pub fn with_value<T: 'static>(mut self, value: T) -> Self {
        self.insert::<T>().set(value);
        self
    }

    /// Declare a provision for `T`, returning the typed handle
    ///
    /// Declaring the same type twice returns the existing provision.
    pub fn insert<T: 'static>(&mut self) -> Rc<Provision<T>> {
        if let Some(existing) = self.get::<T>() {
            return existing;
        }
        let provision = Rc::new(Provision::<T>::new());
        self.entries.push(provision.clone());
        provision
    }

    /// Typed handle for `T`
    pub fn get<T: 'static>(&self) -> Option<Rc<Provision<T>>> {
        self.get_erased(TypeKey::of::<T>())
            .and_then(|erased| erased.downcast_rc::<Provision<T>>().ok())
    }

    /// Type-erased handle for `key`
    pub fn get_erased(&self, key: TypeKey) -> Option<Rc<dyn ErasedProvision>> {
        self.entries
            .iter()
            .find(|entry| entry.key() == key)
            .cloned()
    }

    /// Whether a provision for `key` is declared
    pub fn contains(&self, key: TypeKey) -> bool {
        self.entries.iter().any(|entry| entry.key() == key)
    }

    /// Assign the value of a declared provision
    pub fn set<T: 'static>(&self, value: T) -> Result<()> {
        let provision = self
            .get::<T>()
            .ok_or_else(|| Error::provision_missing(TypeKey::of::<T>().name(), &self.owner))?;
        provision.set(value);
        Ok(())
    }

    /// Keys of every declared provision, in declaration order
    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.entries.iter().map(|entry| entry.key())
    }

    /// Type-erased provisions, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn ErasedProvision>> + '_ {
        self.entries.iter()
    }

    /// Whether every declared provision is ready
    pub fn all_ready(&self) -> bool {
        self.entries.iter().all(|entry| entry.is_ready())
    }

    /// Owner label
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Number of declared provisions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no provision is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Provisions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Provisions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provisions")
            .field("owner", &self.owner)
            .field("types", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}
