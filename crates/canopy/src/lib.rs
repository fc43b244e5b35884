//! # Canopy
//!
//! Lazily-resolved dependency injection for hierarchical node trees.
//!
//! Provider nodes expose typed values to their descendants. Dependent nodes
//! declare which types they need; the injector binds each one to its nearest
//! providing ancestor (or a global provider) and calls `loaded()` once every
//! provider has marked its values ready, whatever order the two sides
//! initialise in.
//!
//! ## Example
//!
//! ```ignore
//! use canopy::prelude::*;
//!
//! #[derive(Clone)]
//! struct Config { name: String }
//!
//! struct Player { link: SceneLink, dependencies: Dependencies }
//! // impl TreeNode + Dependent for Player ...
//!
//! declare_dependencies!(Player => [Config]);
//!
//! let injector = bootstrap(&CanopyConfig::default())?;
//! injector.register_root(&game);   // from the provider's init hook
//! game.provisions.set(Config { name: "x".into() })?;
//! injector.provide(&game)?;
//! injector.depend(&player)?;   // loaded() runs here
//! ```
//!
//! ## Architecture
//!
//! - `domain` - provisions, readiness signals, dependency slots, observers, errors
//! - `application` - declarations, resolver, global registry, injector
//! - `infrastructure` - configuration, logging, host tree adapter, bootstrap

/// Domain layer - entities, ports and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use canopy_domain::*;
}

/// Application layer - declarations, resolution and orchestration
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use canopy_application::*;
}

/// Infrastructure layer - config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use canopy_infrastructure::*;
}

pub use canopy_application::declare_dependencies;
pub use canopy_application::{DeclarationTable, Injector, InjectorOptions, ProvidePolicy};
pub use canopy_domain::{Error, Result};
pub use canopy_infrastructure::{SceneLink, bootstrap, bootstrap_with};

/// Everything a host needs to wire its nodes
pub mod prelude {
    pub use canopy_application::declare_dependencies;
    pub use canopy_application::{DeclarationTable, Injector, InjectorOptions, ProvidePolicy};
    pub use canopy_domain::entities::{
        Dependencies, Notifier, Provision, Provisions, SlotState, StateMachine, Transition,
    };
    pub use canopy_domain::ports::{Dependent, TreeNode};
    pub use canopy_domain::value_objects::TypeKey;
    pub use canopy_domain::{Error, Result};
    pub use canopy_infrastructure::config::{CanopyConfig, ConfigLoader};
    pub use canopy_infrastructure::logging::init_logging;
    pub use canopy_infrastructure::{SceneLink, bootstrap, bootstrap_with};
}
