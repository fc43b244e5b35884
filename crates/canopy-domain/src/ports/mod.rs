//! Domain ports
//!
//! Contracts the host application implements for the injection engine.

pub mod tree;

pub use tree::{Dependent, TreeNode};
