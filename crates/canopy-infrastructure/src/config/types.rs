//! Configuration types

use std::path::PathBuf;

use canopy_application::injector::{InjectorOptions, ProvidePolicy};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_LEVEL;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanopyConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Injection engine behaviour
    pub injection: InjectionConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Injection engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionConfig {
    /// What a repeated provide does (`ignore` or `reject`)
    pub provide_policy: ProvidePolicy,

    /// Consult the global registry after the ancestor walk
    pub global_fallback: bool,

    /// Register parentless providers globally on provide
    pub auto_register_roots: bool,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        let options = InjectorOptions::default();
        Self {
            provide_policy: options.provide_policy,
            global_fallback: options.global_fallback,
            auto_register_roots: options.auto_register_roots,
        }
    }
}

impl From<InjectionConfig> for InjectorOptions {
    fn from(config: InjectionConfig) -> Self {
        Self {
            provide_policy: config.provide_policy,
            global_fallback: config.global_fallback,
            auto_register_roots: config.auto_register_roots,
        }
    }
}
