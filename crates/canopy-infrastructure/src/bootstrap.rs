//! Composition root
//!
//! Builds the [`Injector`] an application uses for its whole tree.
//!
//! ```text
//! CanopyConfig ──► InjectorOptions ─┐
//!                                   ├──► Injector
//! linkme declarations ──► Table ────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! init_logging(&config.logging)?;
//! let injector = bootstrap(&config)?;
//! ```

use canopy_application::declarations::DeclarationTable;
use canopy_application::injector::{Injector, InjectorOptions};
use canopy_domain::error::Result;
use tracing::info;

use crate::config::CanopyConfig;

/// Build an injector over every registered `declare_dependencies!`
pub fn bootstrap(config: &CanopyConfig) -> Result<Injector> {
    bootstrap_with(config, DeclarationTable::registered()?)
}

/// Build an injector over an explicit declaration table
pub fn bootstrap_with(config: &CanopyConfig, declarations: DeclarationTable) -> Result<Injector> {
    let options = InjectorOptions::from(config.injection);
    info!(
        consumers = declarations.len(),
        provide_policy = ?options.provide_policy,
        global_fallback = options.global_fallback,
        auto_register_roots = options.auto_register_roots,
        "injector ready"
    );
    Ok(Injector::new(declarations).with_options(options))
}
