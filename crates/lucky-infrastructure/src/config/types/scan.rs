//! Declaration scan configuration

use serde::{Deserialize, Serialize};

/// Which compile-time declarations the container sees
///
/// Roots are module paths; a declaration is visible when its module equals
/// a root or lies beneath one. No roots means every declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Module path roots, e.g. `"shop::orders"`
    pub roots: Vec<String>,
}
