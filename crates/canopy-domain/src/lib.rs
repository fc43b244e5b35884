//! # Domain Layer
//!
//! Core types of Canopy, a lazily-resolved dependency injection engine for
//! hierarchical node trees.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entities`] | readiness signals, provisions, dependency slots, state machine, notifier |
//! | [`ports`] | host tree contracts ([`TreeNode`](ports::TreeNode), [`Dependent`](ports::Dependent)) |
//! | [`value_objects`] | [`TypeKey`](value_objects::TypeKey) |
//! | [`error`] | error taxonomy |
//! | [`constants`] | domain constants |
//!
//! Everything here is single-threaded: the engine runs on one control
//! thread, so shared state uses `Rc` and `Cell`/`RefCell`.

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
