//! Runtime initialization
//!
//! Loads configuration, installs logging, then bootstraps the container.

use std::path::PathBuf;

use lucky_domain::error::Result;
use tracing::info;

use crate::config::{AppConfig, ConfigLoader};
use crate::di::bootstrap::{RuntimeContext, init_runtime};
use crate::logging::init_logging;

/// One-call start-up: configuration, logging, container
#[derive(Debug, Clone, Default)]
pub struct RuntimeInitializer {
    config_path: Option<PathBuf>,
}

impl RuntimeInitializer {
    /// Initializer using the default configuration lookup
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from an explicit file
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Load the configuration without starting anything
    pub fn load_config(&self) -> Result<AppConfig> {
        let loader = match &self.config_path {
            Some(path) => ConfigLoader::new().with_config_path(path),
            None => ConfigLoader::new(),
        };
        loader.load()
    }

    /// Load configuration, initialize logging and bootstrap the container
    pub fn initialize(&self) -> Result<RuntimeContext> {
        let config = self.load_config()?;
        init_logging(&config.logging)?;
        let context = init_runtime(config)?;
        info!("Runtime initialized successfully");
        Ok(context)
    }
}
