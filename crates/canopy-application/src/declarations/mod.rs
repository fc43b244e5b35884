//! Dependency declarations
//!
//! Which dependency slots a consumer type owns, registered statically with
//! [`declare_dependencies!`](crate::declare_dependencies) or explicitly with
//! [`DeclarationTable::builder`].

pub mod registry;
pub mod table;

pub use registry::{DEPENDENCY_DECLARATIONS, DependencyDeclaration, list_declarations};
pub use table::{DeclarationTable, DeclarationTableBuilder};
