//! Infrastructure layer constants
//!
//! Domain-level constants (join-point separators, the around point name)
//! live in `lucky_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "lucky.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "lucky";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "LUCKY";

/// Separator between nested keys in environment variable names
///
/// `LUCKY_CONTAINER__EAGER_ASPECTS` sets `container.eager_aspects`.
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "LUCKY_LOG";

/// File stem used when the configured log file has none
pub const DEFAULT_LOG_FILE_STEM: &str = "lucky";
