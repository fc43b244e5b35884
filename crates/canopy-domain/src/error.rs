//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Canopy
#[derive(Error, Debug)]
pub enum Error {
    /// No ancestor and no global provider supplies the requested type
    #[error("No provider found for {dependency} (requested by {consumer})")]
    ProviderNotFound {
        /// Type name of the requested dependency
        dependency: &'static str,
        /// Label of the consumer node that requested it
        consumer: String,
    },

    /// A consumer began resolution without declaring any dependency slot
    #[error("{consumer} called depend() but declares no dependencies")]
    NoDependenciesDeclared {
        /// Type name of the consumer
        consumer: &'static str,
    },

    /// A state machine rejected the requested transition
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        /// Debug rendering of the current state
        from: String,
        /// Debug rendering of the rejected candidate state
        to: String,
    },

    /// The resolved provider has not called provide() yet
    #[error("Provider for {dependency} is not ready yet")]
    ProviderNotReady {
        /// Type name of the dependency
        dependency: &'static str,
    },

    /// The consumer has no slot for the requested type
    #[error("Dependency {dependency} has not been resolved")]
    DependencyNotResolved {
        /// Type name of the dependency
        dependency: &'static str,
    },

    /// A provider does not expose, or never assigned, the requested value
    #[error("{node} has no value for {dependency}")]
    ProvisionMissing {
        /// Type name of the provision
        dependency: &'static str,
        /// Label of the provider node
        node: String,
    },

    /// provide() was repeated while the reject policy is active
    #[error("{node} already provided {dependency}")]
    AlreadyProvided {
        /// Type name of the provision
        dependency: &'static str,
        /// Label of the provider node
        node: String,
    },

    /// Inconsistent dependency declarations
    #[error("Declaration error: {message}")]
    Declaration {
        /// Description of the declaration problem
        message: String,
    },

    /// Configuration-related error (simple form)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Configuration-related error (with source)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a provider-not-found error
    pub fn provider_not_found<S: Into<String>>(dependency: &'static str, consumer: S) -> Self {
        Self::ProviderNotFound {
            dependency,
            consumer: consumer.into(),
        }
    }

    /// Create a no-dependencies-declared error
    pub fn no_dependencies_declared(consumer: &'static str) -> Self {
        Self::NoDependenciesDeclared { consumer }
    }

    /// Create a provider-not-ready error
    pub fn provider_not_ready(dependency: &'static str) -> Self {
        Self::ProviderNotReady { dependency }
    }

    /// Create a dependency-not-resolved error
    pub fn dependency_not_resolved(dependency: &'static str) -> Self {
        Self::DependencyNotResolved { dependency }
    }
}

// Provider error creation methods
impl Error {
    /// Create a provision-missing error
    pub fn provision_missing<S: Into<String>>(dependency: &'static str, node: S) -> Self {
        Self::ProvisionMissing {
            dependency,
            node: node.into(),
        }
    }

    /// Create an already-provided error
    pub fn already_provided<S: Into<String>>(dependency: &'static str, node: S) -> Self {
        Self::AlreadyProvided {
            dependency,
            node: node.into(),
        }
    }

    /// Create an invalid transition error from the debug form of both states
    pub fn invalid_transition<F: std::fmt::Debug, T: std::fmt::Debug>(from: &F, to: &T) -> Self {
        Self::InvalidTransition {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}

// Configuration and infrastructure error creation methods
impl Error {
    /// Create a declaration error
    pub fn declaration<S: Into<String>>(message: S) -> Self {
        Self::Declaration {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// Whether this error came out of provider resolution
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::ProviderNotFound { .. }
                | Self::ProviderNotReady { .. }
                | Self::DependencyNotResolved { .. }
        )
    }

    /// Whether this error signals a misdeclared consumer or type chain
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            Self::NoDependenciesDeclared { .. } | Self::Declaration { .. }
        )
    }
}
