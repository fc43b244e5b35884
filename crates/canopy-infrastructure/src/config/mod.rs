//! Configuration
//!
//! [`CanopyConfig`] and the Figment-based [`ConfigLoader`].

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_config};
pub use types::{CanopyConfig, InjectionConfig, LoggingConfig};
