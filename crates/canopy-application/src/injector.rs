//! Depend/Provide Orchestrator
//!
//! The [`Injector`] wires declarations, the resolver and readiness signals
//! together.
//!
//! ## Consumer side: `depend`
//!
//! ```text
//! depend(consumer)
//!   ├─ slots = declarations.slots_for(type of consumer)      (empty → NoDependenciesDeclared)
//!   ├─ generation = dependencies.begin_cycle()               (old subscriptions go stale)
//!   ├─ resolve every slot                                    (any miss → ProviderNotFound)
//!   ├─ install one DependencySlot per type
//!   └─ subscribe a countdown callback on every readiness signal
//!          └─ last callback of the current generation → consumer.loaded()
//! ```
//!
//! ## Provider side: `provide`
//!
//! Marks every provision of the node ready, in declaration order, which runs
//! all pending consumer callbacks before `provide` returns. Consumers that
//! resolve to the node later find its provisions already ready and complete
//! inside their own `depend` call, so no ordering of `depend` and `provide`
//! loses a notification.
//!
//! A provider that never calls `provide` leaves its consumers waiting
//! forever; no timeout exists. Calling `provide` as soon as every supplied
//! value is set is the provider's responsibility.
//!
//! ## Top-level providers
//!
//! A parentless provider serves consumers of other subtrees through the
//! global registry. Hosts call [`Injector::register_root`] from the
//! provider's initialisation hook, before any dependent resolves; consumers
//! that `depend` between registration and `provide` then wait for it like
//! for any ancestor. `provide` registers unregistered roots as a fallback.

use std::rc::{Rc, Weak};

use canopy_domain::entities::DependencySlot;
use canopy_domain::error::{Error, Result};
use canopy_domain::ports::{Dependent, TreeNode};
use canopy_domain::value_objects::TypeKey;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::declarations::DeclarationTable;
use crate::global::GlobalRegistry;
use crate::latch::CountdownLatch;
use crate::resolver::{Resolution, Resolver};

/// What a repeated `provide` does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvidePolicy {
    /// Already-ready provisions are skipped silently
    #[default]
    Ignore,
    /// A provide touching an already-ready provision fails with
    /// [`Error::AlreadyProvided`] before marking anything
    Reject,
}

/// Injector behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectorOptions {
    /// Repeated provide policy
    pub provide_policy: ProvidePolicy,
    /// Whether resolution falls back to the global registry
    pub global_fallback: bool,
    /// Whether provide registers parentless providers globally
    pub auto_register_roots: bool,
}

impl Default for InjectorOptions {
    fn default() -> Self {
        Self {
            provide_policy: ProvidePolicy::Ignore,
            global_fallback: true,
            auto_register_roots: true,
        }
    }
}

/// Dependency injection orchestrator
///
/// One injector serves a whole host tree. It is not thread-safe; every call
/// must come from the tree's control thread.
#[derive(Debug, Default)]
pub struct Injector {
    declarations: DeclarationTable,
    globals: GlobalRegistry,
    options: InjectorOptions,
}

impl Injector {
    /// Injector over an explicit declaration table
    pub fn new(declarations: DeclarationTable) -> Self {
        Self {
            declarations,
            globals: GlobalRegistry::new(),
            options: InjectorOptions::default(),
        }
    }

    /// Injector over every `declare_dependencies!` in the binary
    pub fn registered() -> Result<Self> {
        Ok(Self::new(DeclarationTable::registered()?))
    }

    /// Replace the behaviour switches
    #[must_use]
    pub fn with_options(mut self, options: InjectorOptions) -> Self {
        self.options = options;
        self
    }

    /// Behaviour switches in effect
    pub fn options(&self) -> &InjectorOptions {
        &self.options
    }

    /// Declaration table in use
    pub fn declarations(&self) -> &DeclarationTable {
        &self.declarations
    }

    /// Global fallback registry
    pub fn globals(&self) -> &GlobalRegistry {
        &self.globals
    }

    /// Add a top-level provider to the global registry
    ///
    /// Must happen before any resolution that relies on it.
    pub fn register_global(&self, node: Rc<dyn TreeNode>) -> bool {
        self.globals.register(node)
    }

    /// Register a top-level provider when it initialises
    ///
    /// Registers `provider` globally when it has no parent and exposes
    /// provisions, independently of whether they are ready yet. Returns
    /// whether the node was newly registered.
    pub fn register_root<P>(&self, provider: &Rc<P>) -> bool
    where
        P: TreeNode + 'static,
    {
        if provider.parent().is_some() {
            trace!(node = %provider.label(), "not a root, skipping global registration");
            return false;
        }
        if provider.provisions().is_none_or(|p| p.is_empty()) {
            return false;
        }
        self.globals.register(provider.clone())
    }

    /// Remove a provider from the global registry
    pub fn unregister_global(&self, node: &Rc<dyn TreeNode>) -> bool {
        self.globals.unregister(node)
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.globals).with_global_fallback(self.options.global_fallback)
    }

    /// Resolve a single type for `consumer` without touching its registry
    pub fn resolve(&self, consumer: &dyn TreeNode, key: TypeKey) -> Result<Resolution> {
        self.resolver().resolve(consumer, key)
    }

    // ========================================================================
    // Consumer side
    // ========================================================================

    /// Begin dependency resolution for `consumer`
    ///
    /// Rebuilds the consumer's registry from its declarations and subscribes
    /// to every provider. `loaded()` runs once all providers are ready, which
    /// may already happen before this call returns.
    ///
    /// Calling `depend` again starts a new cycle: callbacks of the previous
    /// cycle become inert and can no longer complete the new one. On error
    /// the registry is left empty and `loaded()` is not called.
    pub fn depend<C>(&self, consumer: &Rc<C>) -> Result<()>
    where
        C: Dependent + 'static,
    {
        let owner = TypeKey::of::<C>();
        let declared = self.declarations.slots_for(owner);
        if declared.is_empty() {
            return Err(Error::no_dependencies_declared(owner.name()));
        }

        let dependencies = consumer.dependencies();
        let generation = dependencies.begin_cycle();
        debug!(
            consumer = %consumer.label(),
            generation,
            slots = declared.len(),
            "beginning dependency resolution"
        );

        let resolver = self.resolver();
        let resolutions = declared
            .iter()
            .map(|key| resolver.resolve(&**consumer, *key))
            .collect::<Result<Vec<_>>>()?;

        for resolution in &resolutions {
            dependencies.install(DependencySlot::resolved(
                resolution.key,
                resolution.provision.clone(),
                resolution.provider_label.as_str(),
            ));
        }

        let latch = Rc::new(CountdownLatch::new(resolutions.len(), generation));
        for resolution in resolutions {
            // loaded() may have re-entered depend for this consumer already.
            if dependencies.generation() != generation {
                trace!(generation, "resolution cycle superseded while subscribing");
                break;
            }
            trace!(dependency = %resolution.key, ready = resolution.provision.is_ready(), "subscribing");
            let callback = on_ready(Rc::downgrade(consumer), latch.clone(), resolution.key);
            resolution.provision.signal().subscribe(callback);
        }
        Ok(())
    }

    // ========================================================================
    // Provider side
    // ========================================================================

    /// Mark every provision of `provider` ready
    ///
    /// Values must be assigned beforehand; this is not enforced, a provision
    /// without a value is only logged. Returns how many provisions became
    /// ready during this call.
    pub fn provide<P>(&self, provider: &Rc<P>) -> Result<usize>
    where
        P: TreeNode + 'static,
    {
        let label = provider.label();
        let Some(provisions) = provider.provisions() else {
            warn!(node = %label, "provide() called on a node without provisions");
            return Ok(0);
        };

        if self.options.provide_policy == ProvidePolicy::Reject
            && let Some(ready) = provisions.iter().find(|p| p.is_ready())
        {
            return Err(Error::already_provided(ready.key().name(), label));
        }

        if self.options.auto_register_roots && self.register_root(provider) {
            debug!(node = %label, "root registered on provide, not on initialisation");
        }

        let mut newly_ready = 0;
        for provision in provisions.iter() {
            if !provision.has_value() {
                warn!(node = %label, dependency = %provision.key(), "provided without a value");
            }
            if provision.mark_ready() {
                newly_ready += 1;
                debug!(node = %label, dependency = %provision.key(), "provision ready");
            } else {
                warn!(node = %label, dependency = %provision.key(), "provision already ready, ignoring");
            }
        }
        Ok(newly_ready)
    }
}

/// Countdown callback for one slot of one resolution cycle
fn on_ready<C>(consumer: Weak<C>, latch: Rc<CountdownLatch>, key: TypeKey) -> impl FnOnce() + 'static
where
    C: Dependent + 'static,
{
    move || {
        let Some(consumer) = consumer.upgrade() else {
            trace!(dependency = %key, "consumer dropped before its provider became ready");
            return;
        };
        let dependencies = consumer.dependencies();
        if dependencies.generation() != latch.generation() {
            trace!(dependency = %key, generation = latch.generation(), "ignoring stale subscription");
            return;
        }
        if latch.count_down() {
            dependencies.mark_loaded();
            info!(consumer = %consumer.label(), "dependencies loaded");
            consumer.loaded();
        }
    }
}
