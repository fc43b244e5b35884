//! Infrastructure layer constants
//!
//! Domain constants live in `canopy_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "canopy.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "canopy";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "CANOPY";

/// Separator between the prefix and nested keys (`CANOPY__LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "CANOPY_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name prefix of rolling log files
pub const DEFAULT_LOG_FILE_PREFIX: &str = "canopy";
