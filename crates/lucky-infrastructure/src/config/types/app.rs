//! Main application configuration

use serde::{Deserialize, Serialize};

use super::container::ContainerConfig;
use super::logging::LoggingConfig;
use super::scan::ScanConfig;

/// Root configuration, one section per concern
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [scan]
/// roots = ["shop"]
///
/// [container]
/// eager_aspects = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Declaration scan configuration
    pub scan: ScanConfig,
    /// Container bootstrap configuration
    pub container: ContainerConfig,
}
