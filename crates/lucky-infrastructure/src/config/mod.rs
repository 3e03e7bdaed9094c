//! Configuration management
//!
//! Layered loading through figment: built-in defaults, then the TOML file,
//! then `LUCKY_*` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, ContainerConfig, LoggingConfig, ScanConfig};
