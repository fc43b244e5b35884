//! Value objects
//!
//! Immutable, equality-compared values shared by every layer.

pub mod type_key;

pub use type_key::TypeKey;
