//! In-memory metadata source

use lucky_domain::ports::{MetadataSource, TypeDescriptor};

/// Fixed list of descriptors, returned in insertion order
///
/// Used by tests and by hosts that assemble their declarations at runtime.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadataSource {
    types: Vec<TypeDescriptor>,
}

impl InMemoryMetadataSource {
    /// Empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type
    #[must_use]
    pub fn with_type(mut self, ty: TypeDescriptor) -> Self {
        self.types.push(ty);
        self
    }

    /// Add a type in place
    pub fn push(&mut self, ty: TypeDescriptor) {
        self.types.push(ty);
    }
}

impl FromIterator<TypeDescriptor> for InMemoryMetadataSource {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

impl MetadataSource for InMemoryMetadataSource {
    fn list_types(&self) -> Vec<TypeDescriptor> {
        self.types.clone()
    }
}
