//! Host tree ports
//!
//! The host application owns its tree of nodes. The injection engine only
//! reads parent links, provision tables and dependency registries through the
//! traits below and never controls node lifetime.

use std::rc::Rc;

use crate::constants::UNNAMED_NODE_LABEL;
use crate::entities::{Dependencies, Provisions};

/// A node of the host tree
///
/// The host must attach a node's parent chain before the node's
/// initialisation hook calls into the injector.
pub trait TreeNode {
    /// Parent node, `None` at a root
    fn parent(&self) -> Option<Rc<dyn TreeNode>>;

    /// Provisions this node exposes, `None` for plain nodes
    fn provisions(&self) -> Option<&Provisions> {
        None
    }

    /// Diagnostic label
    fn label(&self) -> String {
        UNNAMED_NODE_LABEL.to_string()
    }
}

/// A node that depends on values supplied by its ancestors
///
/// Which types it depends on is declared per concrete type in the
/// declaration table, not by the node itself.
pub trait Dependent: TreeNode {
    /// Registry of resolved dependency slots
    fn dependencies(&self) -> &Dependencies;

    /// Completion callback, invoked once per resolution cycle when every
    /// declared dependency is ready
    fn loaded(&self);
}
