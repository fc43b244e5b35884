//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the injection engine.
//!
//! ### Configuration & Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration through Figment |
//! | [`bootstrap`] | builds the application [`Injector`](canopy_application::Injector) |
//! | [`constants`] | infrastructure constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | structured logging with tracing |
//!
//! ### Host Integration
//! | Module | Description |
//! |--------|-------------|
//! | [`scene`] | weak parent links for host tree nodes |
//! | [`error_ext`] | context conversion of foreign errors |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod scene;

pub use bootstrap::{bootstrap, bootstrap_with};
pub use error_ext::ErrorContext;
pub use scene::SceneLink;
