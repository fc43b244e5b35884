//! # Application Layer
//!
//! Resolution and orchestration for Canopy.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`declarations`] | linkme declaration registry, `declare_dependencies!` and the merged table |
//! | [`resolver`] | nearest-ancestor then global provider search |
//! | [`global`] | global fallback registry |
//! | [`latch`] | countdown latch used to detect completion |
//! | [`injector`] | `depend` / `provide` orchestration |
//!
//! ## Example
//!
//! ```ignore
//! use canopy_application::declare_dependencies;
//!
//! declare_dependencies!(Player => [Config]);
//!
//! let injector = Injector::registered()?;
//! injector.provide(&game)?;
//! injector.depend(&player)?;
//! ```

pub mod declarations;
pub mod global;
pub mod injector;
pub mod latch;
pub mod resolver;

pub use declarations::{DeclarationTable, DeclarationTableBuilder, DependencyDeclaration};
pub use global::GlobalRegistry;
pub use injector::{Injector, InjectorOptions, ProvidePolicy};
pub use resolver::{Resolution, ResolutionSource, Resolver};

#[doc(hidden)]
pub mod __private {
    pub use canopy_domain::value_objects::TypeKey;
    pub use linkme;
}
