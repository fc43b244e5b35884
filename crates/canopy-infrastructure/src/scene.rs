//! Host tree adapter
//!
//! [`SceneLink`] is the parent bookkeeping a host node embeds to satisfy
//! [`TreeNode`]. Parents are held weakly: the host owns its nodes top-down,
//! so a link never keeps its parent alive.
//!
//! ```ignore
//! struct Player {
//!     link: SceneLink,
//!     dependencies: Dependencies,
//! }
//!
//! impl TreeNode for Player {
//!     fn parent(&self) -> Option<Rc<dyn TreeNode>> {
//!         self.link.parent()
//!     }
//!
//!     fn label(&self) -> String {
//!         self.link.name().to_string()
//!     }
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};

use canopy_domain::error::{Error, Result};
use canopy_domain::ports::TreeNode;
use tracing::trace;

/// Weak parent link and name of a host node
pub struct SceneLink {
    name: String,
    parent: RefCell<Option<Weak<dyn TreeNode>>>,
}

impl SceneLink {
    /// Detached link
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            parent: RefCell::new(None),
        }
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current parent, `None` when detached or when the parent was dropped
    pub fn parent(&self) -> Option<Rc<dyn TreeNode>> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// Whether the link has a live parent
    pub fn is_attached(&self) -> bool {
        self.parent().is_some()
    }

    /// Attach to `parent`
    ///
    /// Fails when the link already has a live parent; use
    /// [`reparent`](Self::reparent) to move a node. Fails as well when
    /// `parent` descends from the node owning this link.
    pub fn attach(&self, parent: &Rc<dyn TreeNode>) -> Result<()> {
        if let Some(current) = self.parent() {
            return Err(Error::internal(format!(
                "{} is already attached to {}",
                self.name,
                current.label()
            )));
        }
        self.link_to(parent)
    }

    /// Detach from the current parent, returning it
    pub fn detach(&self) -> Option<Rc<dyn TreeNode>> {
        let previous = self.parent();
        self.set_parent(None);
        previous
    }

    /// Move under `parent`, returning the previous parent
    ///
    /// Dependents must call `depend` again afterwards to bind to the
    /// providers of their new position. Moving a node under itself or one
    /// of its descendants fails and keeps the current parent.
    pub fn reparent(&self, parent: &Rc<dyn TreeNode>) -> Result<Option<Rc<dyn TreeNode>>> {
        let previous = self.parent();
        self.link_to(parent)?;
        Ok(previous)
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Number of ancestors
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Link to `parent`, undoing the change when it closes a parent loop
    fn link_to(&self, parent: &Rc<dyn TreeNode>) -> Result<()> {
        let previous = self.parent.borrow().clone();
        self.set_parent(Some(parent));

        let mut seen = HashSet::new();
        let closes_loop = self
            .ancestors()
            .any(|node| !seen.insert(Rc::as_ptr(&node).cast::<()>()));
        if closes_loop {
            *self.parent.borrow_mut() = previous;
            return Err(Error::internal(format!(
                "attaching {} under {} would create a parent cycle",
                self.name,
                parent.label()
            )));
        }
        Ok(())
    }

    fn set_parent(&self, parent: Option<&Rc<dyn TreeNode>>) {
        let label = parent.map_or_else(|| "<none>".to_string(), |p| p.label());
        trace!(node = %self.name, parent = %label, "parent link changed");
        *self.parent.borrow_mut() = parent.map(Rc::downgrade);
    }
}

impl fmt::Debug for SceneLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneLink")
            .field("name", &self.name)
            .field("parent", &self.parent().map(|p| p.label()))
            .finish()
    }
}

/// Iterator over the ancestors of a node, nearest first
pub struct Ancestors {
    next: Option<Rc<dyn TreeNode>>,
}

impl Iterator for Ancestors {
    type Item = Rc<dyn TreeNode>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
