//! Declared Type Registry
//!
//! Compile-time registration of component and aspect types through a
//! `linkme` distributed slice. Each declaring crate submits a
//! [`TypeDeclaration`]; [`LinkedMetadataSource`](crate::metadata::LinkedMetadataSource)
//! reads the slice at bootstrap.
//!
//! ## Usage
//!
//! ```ignore
//! use lucky_application::ports::registry::{DECLARED_TYPES, MarkerDeclaration, TypeDeclaration};
//! use lucky_domain::{MarkerCategory, TypeShape};
//!
//! #[linkme::distributed_slice(DECLARED_TYPES)]
//! static ORDER_SERVICE: TypeDeclaration = TypeDeclaration {
//!     simple_name: "OrderService",
//!     module_path: module_path!(),
//!     markers: &[MarkerDeclaration::new(MarkerCategory::Component)],
//!     shape: TypeShape::Plain,
//!     depends_on: &["orderRepository"],
//!     operations: &[],
//!     factory: Some(|components| Ok(Arc::new(OrderService::new(components.lookup_as("orderRepository")?)))),
//! };
//! ```

use lucky_domain::ports::{
    Factory, Marker, MarkerCategory, OperationDescriptor, OperationHandler, TypeDescriptor,
    TypeShape,
};

/// Static form of a [`Marker`]
#[derive(Debug, Clone, Copy)]
pub struct MarkerDeclaration {
    /// Marker category
    pub category: MarkerCategory,
    /// Override or payload, empty for none
    pub value: &'static str,
}

impl MarkerDeclaration {
    /// Marker without a value
    pub const fn new(category: MarkerCategory) -> Self {
        Self {
            category,
            value: "",
        }
    }

    /// Marker with an explicit name or payload
    pub const fn named(category: MarkerCategory, value: &'static str) -> Self {
        Self { category, value }
    }

    /// Owned marker
    pub fn to_marker(&self) -> Marker {
        Marker::with_value(self.category, self.value)
    }
}

/// Static form of an [`OperationDescriptor`]
#[derive(Debug, Clone, Copy)]
pub struct OperationDeclaration {
    /// Simple method name
    pub name: &'static str,
    /// Markers in declaration order
    pub markers: &'static [MarkerDeclaration],
    /// How to call it
    pub handler: Option<OperationHandler>,
}

impl OperationDeclaration {
    /// Owned descriptor
    pub fn to_descriptor(&self) -> OperationDescriptor {
        OperationDescriptor {
            name: self.name.to_string(),
            markers: self.markers.iter().map(MarkerDeclaration::to_marker).collect(),
            handler: self.handler,
        }
    }
}

/// Registry entry for one declared type
pub struct TypeDeclaration {
    /// Simple type name
    pub simple_name: &'static str,
    /// Declaring module, normally `module_path!()`
    pub module_path: &'static str,
    /// Type-level markers
    pub markers: &'static [MarkerDeclaration],
    /// Plain or around-capable
    pub shape: TypeShape,
    /// Component ids that must exist before this type is built
    pub depends_on: &'static [&'static str],
    /// Declared operations
    pub operations: &'static [OperationDeclaration],
    /// How to build an instance
    pub factory: Option<Factory>,
}

impl TypeDeclaration {
    /// Owned descriptor
    pub fn to_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor {
            simple_name: self.simple_name.to_string(),
            module_path: self.module_path.to_string(),
            markers: self.markers.iter().map(MarkerDeclaration::to_marker).collect(),
            shape: self.shape,
            depends_on: self.depends_on.iter().map(|id| (*id).to_string()).collect(),
            operations: self
                .operations
                .iter()
                .map(OperationDeclaration::to_descriptor)
                .collect(),
            factory: self.factory,
        }
    }
}

// Auto-collection via linkme distributed slices - declaring crates submit entries at compile time
#[linkme::distributed_slice]
pub static DECLARED_TYPES: [TypeDeclaration] = [..];

/// List all declared types as `(module_path, simple_name)` pairs
///
/// Useful for diagnostics when a scan root does not pick up an expected type.
pub fn list_declared_types() -> Vec<(&'static str, &'static str)> {
    DECLARED_TYPES
        .iter()
        .map(|decl| (decl.module_path, decl.simple_name))
        .collect()
}
