//! Provider Resolver
//!
//! Finds the provision a consumer should bind to for a requested type.
//!
//! ## Algorithm
//!
//! ```text
//! consumer ──parent──► A ──parent──► B ──parent──► root     (1) nearest ancestor wins
//!                                                   │
//!                                                   ▼
//!                              GlobalRegistry [G1, G2, ...]  (2) first registered wins
//!                                                   │
//!                                                   ▼
//!                                      Error::ProviderNotFound
//! ```
//!
//! Matching is by capability: any node whose provision table holds the exact
//! requested type qualifies, whatever its concrete type.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use canopy_domain::entities::ErasedProvision;
use canopy_domain::error::{Error, Result};
use canopy_domain::ports::TreeNode;
use canopy_domain::value_objects::TypeKey;
use tracing::debug;

use crate::global::GlobalRegistry;

/// Where a provision was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// An ancestor of the consumer; depth 1 is the parent
    Ancestor {
        /// Distance from the consumer
        depth: usize,
    },
    /// The global registry
    Global,
}

/// Outcome of a successful resolution
#[derive(Clone)]
pub struct Resolution {
    /// Requested type
    pub key: TypeKey,
    /// Matching provision
    pub provision: Rc<dyn ErasedProvision>,
    /// Label of the node owning the provision
    pub provider_label: String,
    /// Where the provision was found
    pub source: ResolutionSource,
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("key", &self.key)
            .field("provider", &self.provider_label)
            .field("source", &self.source)
            .field("ready", &self.provision.is_ready())
            .finish()
    }
}

/// Ancestor-then-global provider search
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    globals: &'a GlobalRegistry,
    global_fallback: bool,
}

impl<'a> Resolver<'a> {
    /// Resolver consulting `globals` after the ancestor walk
    pub fn new(globals: &'a GlobalRegistry) -> Self {
        Self {
            globals,
            global_fallback: true,
        }
    }

    /// Enable or disable the global fallback tier
    #[must_use]
    pub fn with_global_fallback(mut self, enabled: bool) -> Self {
        self.global_fallback = enabled;
        self
    }

    /// Resolve `key` for `consumer`
    ///
    /// The consumer itself is never a candidate; the walk starts at its
    /// parent. A parent chain that loops back on itself is an error.
    pub fn resolve(&self, consumer: &dyn TreeNode, key: TypeKey) -> Result<Resolution> {
        let mut depth = 0;
        let mut visited = HashSet::new();
        let mut current = consumer.parent();
        while let Some(node) = current {
            if !visited.insert(Rc::as_ptr(&node).cast::<()>()) {
                return Err(Error::internal(format!(
                    "parent chain of {} loops through {}",
                    consumer.label(),
                    node.label()
                )));
            }
            depth += 1;
            if let Some(provision) = node.provisions().and_then(|p| p.get_erased(key)) {
                let provider_label = node.label();
                debug!(
                    dependency = %key,
                    provider = %provider_label,
                    depth,
                    "resolved from ancestor"
                );
                return Ok(Resolution {
                    key,
                    provision,
                    provider_label,
                    source: ResolutionSource::Ancestor { depth },
                });
            }
            current = node.parent();
        }

        if self.global_fallback
            && let Some((node, provision)) = self.globals.find(key)
        {
            let provider_label = node.label();
            debug!(dependency = %key, provider = %provider_label, "resolved from global registry");
            return Ok(Resolution {
                key,
                provision,
                provider_label,
                source: ResolutionSource::Global,
            });
        }

        Err(Error::provider_not_found(key.name(), consumer.label()))
    }
}
