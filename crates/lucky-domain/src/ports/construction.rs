//! Construction and invocation capabilities
//!
//! Supplied by the surrounding framework; the container only depends on
//! these narrow traits.

use std::any::type_name;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ports::component::Component;
use crate::ports::metadata::{OperationDescriptor, TypeDescriptor};
use crate::value_objects::{JoinPoint, Value};

/// Read access to registered components, handed to factories
pub trait ComponentLookup: Send + Sync {
    /// Component registered under `id`
    fn lookup(&self, id: &str) -> Result<Arc<dyn Component>>;

    /// Whether `id` is registered
    fn contains(&self, id: &str) -> bool;
}

impl dyn ComponentLookup + '_ {
    /// Component registered under `id`, downcast to `T`
    pub fn lookup_as<T: Component>(&self, id: &str) -> Result<Arc<T>> {
        self.lookup(id)?
            .downcast_arc::<T>()
            .map_err(|_| Error::component_type_mismatch(id, type_name::<T>()))
    }
}

/// Instantiates declared types
pub trait Constructor: Send + Sync {
    /// Build one instance of `ty`
    fn build(
        &self,
        ty: &TypeDescriptor,
        components: &dyn ComponentLookup,
    ) -> Result<Arc<dyn Component>>;
}

/// Calls declared operations on instances
pub trait Invoker: Send + Sync {
    /// Call `operation` on `instance` with the given call context
    fn invoke(
        &self,
        instance: &dyn Component,
        operation: &OperationDescriptor,
        point: &JoinPoint,
    ) -> Result<Value>;
}
