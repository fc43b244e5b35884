//! Global provider registry
//!
//! Fallback pool of top-level provider nodes, searched in registration order
//! when no ancestor of a consumer supplies the requested type. The registry
//! is owned by the [`Injector`](crate::injector::Injector) rather than being
//! an ambient singleton: it lives as long as the application's injector.
//!
//! Entries are held weakly. A node removed from the host tree and dropped is
//! skipped by lookups and discarded by [`GlobalRegistry::prune`]; hosts that
//! keep removed nodes alive call [`GlobalRegistry::unregister`] instead.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use canopy_domain::entities::ErasedProvision;
use canopy_domain::ports::TreeNode;
use canopy_domain::value_objects::TypeKey;
use tracing::debug;

/// Ordered, append-mostly list of top-level providers
#[derive(Default)]
pub struct GlobalRegistry {
    entries: RefCell<Vec<Weak<dyn TreeNode>>>,
}

impl GlobalRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node`
    ///
    /// Returns `false` when the node was already registered.
    pub fn register(&self, node: Rc<dyn TreeNode>) -> bool {
        if self.contains(&node) {
            return false;
        }
        debug!(node = %node.label(), "registered global provider");
        self.entries.borrow_mut().push(Rc::downgrade(&node));
        true
    }

    /// Remove `node`
    ///
    /// Returns `false` when the node was not registered.
    pub fn unregister(&self, node: &Rc<dyn TreeNode>) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| !std::ptr::addr_eq(entry.as_ptr(), Rc::as_ptr(node)));
        let removed = entries.len() != before;
        if removed {
            debug!(node = %node.label(), "unregistered global provider");
        }
        removed
    }

    /// Whether `node` is registered
    pub fn contains(&self, node: &Rc<dyn TreeNode>) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|entry| std::ptr::addr_eq(entry.as_ptr(), Rc::as_ptr(node)))
    }

    /// Drop entries whose node no longer exists, returning how many
    pub fn prune(&self) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| entry.strong_count() > 0);
        before - entries.len()
    }

    /// Live registered nodes, in registration order
    pub fn nodes(&self) -> Vec<Rc<dyn TreeNode>> {
        self.entries
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    /// First registered node exposing a provision for `key`
    pub fn find(&self, key: TypeKey) -> Option<(Rc<dyn TreeNode>, Rc<dyn ErasedProvision>)> {
        // Snapshot first so provisions() never runs while the list is borrowed.
        self.nodes().into_iter().find_map(|node| {
            let provision = node.provisions()?.get_erased(key)?;
            Some((node, provision))
        })
    }

    /// Number of entries, dead ones included until pruned
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl fmt::Debug for GlobalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.nodes().iter().map(|node| node.label()).collect();
        f.debug_struct("GlobalRegistry")
            .field("nodes", &labels)
            .finish()
    }
}
