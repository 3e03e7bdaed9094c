//! Metadata source port
//!
//! The container never introspects types itself. Everything it knows about
//! declared types (markers, names, operations, how to build them) comes from a
//! [`MetadataSource`], so the discovery mechanism can be a compile-time
//! registry, a manifest, or a fixed in-memory fixture in tests.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::SIGNATURE_SEPARATOR;
use crate::error::Result;
use crate::ports::component::Component;
use crate::ports::construction::ComponentLookup;
use crate::value_objects::{JoinPoint, Value};

/// Declarative marker categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerCategory {
    /// Type is a managed component
    Component,
    /// Type declares advice
    Aspect,
    /// Operation is before-advice
    Before,
    /// Operation is after-advice
    After,
    /// Operation wants the named join point applied when it is called
    JoinPoint,
    /// Operation runs once after all components are registered
    InitRun,
    /// Operation runs once at shutdown
    CloseRun,
}

impl MarkerCategory {
    /// Lower-case name of the category
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Aspect => "aspect",
            Self::Before => "before",
            Self::After => "after",
            Self::JoinPoint => "join_point",
            Self::InitRun => "init_run",
            Self::CloseRun => "close_run",
        }
    }
}

impl fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One marker on a type or operation
///
/// `value` is the explicit name override (empty means none). On
/// [`MarkerCategory::JoinPoint`] markers it is the bound join-point id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker {
    /// Marker category
    pub category: MarkerCategory,
    /// Override or payload
    pub value: String,
}

impl Marker {
    /// Marker without a value
    pub fn new(category: MarkerCategory) -> Self {
        Self {
            category,
            value: String::new(),
        }
    }

    /// Marker with a value
    pub fn with_value(category: MarkerCategory, value: impl Into<String>) -> Self {
        Self {
            category,
            value: value.into(),
        }
    }

    /// Explicit name override, `None` when the value is empty
    pub fn override_name(&self) -> Option<&str> {
        if self.value.is_empty() {
            None
        } else {
            Some(&self.value)
        }
    }
}

/// Whether a type can govern calls as around-advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeShape {
    /// Ordinary type
    #[default]
    Plain,
    /// Type implements [`AroundAdvice`](crate::ports::AroundAdvice)
    Around,
}

/// Builds an instance, resolving dependencies from already-registered components
pub type Factory = fn(&dyn ComponentLookup) -> Result<Arc<dyn Component>>;

/// Calls one declared operation on an instance
pub type OperationHandler = fn(&dyn Component, &JoinPoint) -> Result<Value>;

/// A declared operation (method) of a type
#[derive(Clone)]
pub struct OperationDescriptor {
    /// Simple method name
    pub name: String,
    /// Markers in declaration order
    pub markers: Vec<Marker>,
    /// How to call it
    pub handler: Option<OperationHandler>,
}

impl OperationDescriptor {
    /// Unmarked operation
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
            handler: None,
        }
    }

    /// Add a marker
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Bind a join point to this operation
    #[must_use]
    pub fn with_join_point(self, id: impl Into<String>) -> Self {
        self.with_marker(Marker::with_value(MarkerCategory::JoinPoint, id))
    }

    /// Set the handler
    #[must_use]
    pub fn with_handler(mut self, handler: OperationHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// First marker of `category`
    pub fn marker(&self, category: MarkerCategory) -> Option<&Marker> {
        self.markers.iter().find(|m| m.category == category)
    }

    /// Whether a marker of `category` is present
    pub fn has_marker(&self, category: MarkerCategory) -> bool {
        self.marker(category).is_some()
    }

    /// Join-point ids bound to this operation, in declaration order
    pub fn join_points(&self) -> impl Iterator<Item = &str> {
        self.markers
            .iter()
            .filter(|m| m.category == MarkerCategory::JoinPoint && !m.value.is_empty())
            .map(|m| m.value.as_str())
    }
}

impl fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("name", &self.name)
            .field("markers", &self.markers)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// Everything the container needs to know about one declared type
#[derive(Clone)]
pub struct TypeDescriptor {
    /// Simple type name (`OrderAudit`)
    pub simple_name: String,
    /// Module path the type was declared in; used by scan roots
    pub module_path: String,
    /// Type-level markers
    pub markers: Vec<Marker>,
    /// Plain or around-capable
    pub shape: TypeShape,
    /// Component ids that must be registered before this type is built
    pub depends_on: Vec<String>,
    /// Declared operations
    pub operations: Vec<OperationDescriptor>,
    /// How to build an instance
    pub factory: Option<Factory>,
}

impl TypeDescriptor {
    /// Unmarked plain type
    pub fn new(simple_name: impl Into<String>) -> Self {
        Self {
            simple_name: simple_name.into(),
            module_path: String::new(),
            markers: Vec::new(),
            shape: TypeShape::Plain,
            depends_on: Vec::new(),
            operations: Vec::new(),
            factory: None,
        }
    }

    /// Set the declaring module path
    #[must_use]
    pub fn in_module(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = module_path.into();
        self
    }

    /// Add a type-level marker
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Mark as around-capable
    #[must_use]
    pub fn around(mut self) -> Self {
        self.shape = TypeShape::Around;
        self
    }

    /// Declare a dependency on a component id
    #[must_use]
    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.depends_on.push(id.into());
        self
    }

    /// Add an operation
    #[must_use]
    pub fn with_operation(mut self, operation: OperationDescriptor) -> Self {
        self.operations.push(operation);
        self
    }

    /// Set the factory
    #[must_use]
    pub fn with_factory(mut self, factory: Factory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// First type-level marker of `category`
    pub fn marker(&self, category: MarkerCategory) -> Option<&Marker> {
        self.markers.iter().find(|m| m.category == category)
    }

    /// Whether a type-level marker of `category` is present
    pub fn has_marker(&self, category: MarkerCategory) -> bool {
        self.marker(category).is_some()
    }

    /// Operation named `name`
    pub fn operation(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations.iter().find(|op| op.name == name)
    }

    /// `module::path::SimpleName`, or the simple name when no module is set
    pub fn qualified_name(&self) -> String {
        if self.module_path.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}{}{}", self.module_path, SIGNATURE_SEPARATOR, self.simple_name)
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.qualified_name())
            .field("markers", &self.markers)
            .field("shape", &self.shape)
            .field("depends_on", &self.depends_on)
            .field("operations", &self.operations)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}

/// Discovery capability consumed by the container
///
/// Implementations must return types in a deterministic order for a given
/// configuration; bootstrap order (and therefore which of two conflicting
/// declarations is reported) follows it.
pub trait MetadataSource: Send + Sync {
    /// Every declared type visible under the configured roots
    fn list_types(&self) -> Vec<TypeDescriptor>;

    /// Types carrying a type-level marker of `category`
    fn list_types_with_marker(&self, category: MarkerCategory) -> Vec<TypeDescriptor> {
        self.list_types()
            .into_iter()
            .filter(|ty| ty.has_marker(category))
            .collect()
    }

    /// Operations of `ty` carrying a marker of `category`, in declaration order
    fn list_operations_with_marker(
        &self,
        ty: &TypeDescriptor,
        category: MarkerCategory,
    ) -> Vec<OperationDescriptor> {
        ty.operations
            .iter()
            .filter(|op| op.has_marker(category))
            .cloned()
            .collect()
    }
}
