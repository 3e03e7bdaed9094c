//! Metadata source backed by the compile-time declared type registry

use lucky_domain::constants::SIGNATURE_SEPARATOR;
use lucky_domain::ports::{MetadataSource, TypeDescriptor};
use tracing::debug;

use crate::ports::registry::{DECLARED_TYPES, TypeDeclaration};

/// Reads [`DECLARED_TYPES`], restricted to the configured scan roots
///
/// A root matches a declaration whose module path equals it or lies beneath
/// it. With no roots every declaration is visible. Results are sorted by
/// `(module_path, simple_name)` so bootstrap order does not depend on link
/// order.
#[derive(Debug, Clone, Default)]
pub struct LinkedMetadataSource {
    roots: Vec<String>,
}

impl LinkedMetadataSource {
    /// See every declaration
    pub fn new() -> Self {
        Self::default()
    }

    /// Only see declarations under `roots`
    pub fn with_roots<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Configured roots
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    fn in_scope(&self, decl: &TypeDeclaration) -> bool {
        self.roots.is_empty()
            || self.roots.iter().any(|root| {
                decl.module_path == root
                    || decl
                        .module_path
                        .strip_prefix(root.as_str())
                        .is_some_and(|rest| rest.starts_with(SIGNATURE_SEPARATOR))
            })
    }
}

impl MetadataSource for LinkedMetadataSource {
    fn list_types(&self) -> Vec<TypeDescriptor> {
        let mut declarations: Vec<&TypeDeclaration> =
            DECLARED_TYPES.iter().filter(|d| self.in_scope(d)).collect();
        declarations.sort_by_key(|d| (d.module_path, d.simple_name));
        debug!(
            total = DECLARED_TYPES.len(),
            in_scope = declarations.len(),
            "Scanned declared types"
        );
        declarations
            .into_iter()
            .map(TypeDeclaration::to_descriptor)
            .collect()
    }
}
