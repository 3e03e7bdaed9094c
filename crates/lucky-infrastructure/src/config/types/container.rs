//! Container bootstrap switches

use serde::{Deserialize, Serialize};

/// Container bootstrap behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Build the advice registry during bootstrap instead of on first use
    pub eager_aspects: bool,

    /// Run `InitRun` hooks once all components are registered
    pub run_init_hooks: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            eager_aspects: false,
            run_init_hooks: true,
        }
    }
}
