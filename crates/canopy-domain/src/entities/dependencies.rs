//! Dependency slots and the per-consumer registry
//!
//! Every consumer owns one [`Dependencies`] registry mapping each declared
//! type to the [`DependencySlot`] it resolved. The registry is rebuilt from
//! scratch on every resolution cycle; each rebuild advances its generation so
//! that subscriptions made by an earlier cycle can recognise themselves as
//! stale.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::constants::INITIAL_GENERATION;
use crate::entities::provision::{ErasedProvision, Provision};
use crate::error::{Error, Result};
use crate::value_objects::TypeKey;

/// Observable state of a dependency slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No provider has been located for the type
    Unresolved,
    /// A provider was located but has not been provided yet
    Pending,
    /// The located provider is ready
    Ready,
}

/// Binding of one consumer to the provider of one type
///
/// Slots are immutable; a new resolution cycle installs new slots instead of
/// updating old ones.
#[derive(Clone)]
pub struct DependencySlot {
    key: TypeKey,
    provider: Option<Rc<dyn ErasedProvision>>,
    provider_label: Option<String>,
}

impl DependencySlot {
    /// Slot for a type whose provider has not been located
    pub fn unresolved(key: TypeKey) -> Self {
        Self {
            key,
            provider: None,
            provider_label: None,
        }
    }

    /// Slot bound to a located provider
    pub fn resolved<S: Into<String>>(
        key: TypeKey,
        provider: Rc<dyn ErasedProvision>,
        provider_label: S,
    ) -> Self {
        Self {
            key,
            provider: Some(provider),
            provider_label: Some(provider_label.into()),
        }
    }

    /// Requested type
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Located provider, if any
    pub fn provider(&self) -> Option<&Rc<dyn ErasedProvision>> {
        self.provider.as_ref()
    }

    /// Label of the node the provider belongs to
    pub fn provider_label(&self) -> Option<&str> {
        self.provider_label.as_deref()
    }

    /// Whether the slot still waits for its provider's readiness signal
    pub fn subscription_active(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| !p.is_ready())
    }

    /// Current slot state
    pub fn state(&self) -> SlotState {
        match &self.provider {
            None => SlotState::Unresolved,
            Some(provider) if provider.is_ready() => SlotState::Ready,
            Some(_) => SlotState::Pending,
        }
    }
}

impl fmt::Debug for DependencySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencySlot")
            .field("key", &self.key)
            .field("provider", &self.provider_label)
            .field("state", &self.state())
            .finish()
    }
}

/// Dependent registry owned by a consumer node
///
/// ## Example
///
/// ```rust
/// use canopy_domain::entities::{Dependencies, SlotState};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Clock(u64);
///
/// let deps = Dependencies::new();
/// assert_eq!(deps.slot_state::<Clock>(), SlotState::Unresolved);
///
/// deps.fake(Clock(7));
/// assert_eq!(deps.get::<Clock>().unwrap(), Clock(7));
/// ```
#[derive(Default)]
pub struct Dependencies {
    generation: Cell<u64>,
    loaded: Cell<bool>,
    slots: RefCell<Vec<DependencySlot>>,
    fakes: RefCell<HashMap<TypeKey, Rc<dyn Any>>>,
}

impl Dependencies {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            generation: Cell::new(INITIAL_GENERATION),
            ..Default::default()
        }
    }

    // ========================================================================
    // Resolution cycle (driven by the injector)
    // ========================================================================

    /// Discard every slot and start a new resolution cycle
    ///
    /// Returns the generation of the new cycle. Fakes are kept.
    pub fn begin_cycle(&self) -> u64 {
        self.slots.borrow_mut().clear();
        self.loaded.set(false);
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    /// Install a slot, replacing any slot for the same type
    pub fn install(&self, slot: DependencySlot) {
        let mut slots = self.slots.borrow_mut();
        match slots.iter_mut().find(|existing| existing.key == slot.key) {
            Some(existing) => *existing = slot,
            None => slots.push(slot),
        }
    }

    /// Record that the current cycle delivered its completion callback
    pub fn mark_loaded(&self) {
        self.loaded.set(true);
    }

    /// Generation of the current resolution cycle
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Whether the current cycle delivered its completion callback
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Slot installed for `key`
    pub fn slot(&self, key: TypeKey) -> Option<DependencySlot> {
        self.slots
            .borrow()
            .iter()
            .find(|slot| slot.key == key)
            .cloned()
    }

    /// State of the slot for `T`
    pub fn slot_state<T: 'static>(&self) -> SlotState {
        self.slot(TypeKey::of::<T>())
            .map_or(SlotState::Unresolved, |slot| slot.state())
    }

    /// Types with an installed slot, in installation order
    pub fn resolved_types(&self) -> Vec<TypeKey> {
        self.slots.borrow().iter().map(DependencySlot::key).collect()
    }

    /// Number of installed slots
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Whether no slot is installed
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    // ========================================================================
    // Value access
    // ========================================================================

    /// Typed provider resolved for `T`
    pub fn provider<T: 'static>(&self) -> Result<Rc<Provision<T>>> {
        let key = TypeKey::of::<T>();
        let provider = self
            .slot(key)
            .and_then(|slot| slot.provider().cloned())
            .ok_or_else(|| Error::dependency_not_resolved(key.name()))?;
        provider
            .downcast_rc::<Provision<T>>()
            .map_err(|_| Error::internal(format!("slot for {key} holds a foreign provision")))
    }

    /// Current value of the dependency `T`
    ///
    /// A fake installed with [`fake`](Self::fake) wins over the resolved
    /// provider.
    pub fn get<T: Clone + 'static>(&self) -> Result<T> {
        self.with(T::clone)
    }

    /// Borrow the current value of the dependency `T`
    ///
    /// `f` may install or clear fakes. When the value comes from a provider,
    /// `f` runs while the provider's value is borrowed, so it must not
    /// assign that same provision.
    pub fn with<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Result<R> {
        let key = TypeKey::of::<T>();
        let fake = self.fakes.borrow().get(&key).cloned();
        if let Some(value) = fake.as_deref().and_then(|fake| fake.downcast_ref::<T>()) {
            return Ok(f(value));
        }

        let provision = self.provider::<T>()?;
        if !provision.is_ready() {
            return Err(Error::provider_not_ready(key.name()));
        }
        let label = self
            .slot(key)
            .and_then(|slot| slot.provider_label().map(str::to_owned))
            .unwrap_or_default();
        provision
            .read(f)
            .ok_or_else(|| Error::provision_missing(key.name(), label))
    }

    // ========================================================================
    // Fakes
    // ========================================================================

    /// Substitute `value` for the dependency `T`
    pub fn fake<T: 'static>(&self, value: T) {
        self.fakes
            .borrow_mut()
            .insert(TypeKey::of::<T>(), Rc::new(value));
    }

    /// Whether a fake is installed for `T`
    pub fn is_faked<T: 'static>(&self) -> bool {
        self.fakes.borrow().contains_key(&TypeKey::of::<T>())
    }

    /// Remove every fake
    pub fn clear_fakes(&self) {
        self.fakes.borrow_mut().clear();
    }
}

impl fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependencies")
            .field("generation", &self.generation.get())
            .field("loaded", &self.loaded.get())
            .field("slots", &*self.slots.borrow())
            .finish_non_exhaustive()
    }
}
