//! Default construction and invocation capabilities
//!
//! Both simply call the function pointers carried by the descriptors.

use std::sync::Arc;

use lucky_domain::error::{Error, Result};
use lucky_domain::ports::{
    Component, ComponentLookup, Constructor, Invoker, OperationDescriptor, TypeDescriptor,
};
use lucky_domain::value_objects::{JoinPoint, Value};
use tracing::debug;

/// Builds instances through [`TypeDescriptor::factory`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FactoryConstructor;

impl Constructor for FactoryConstructor {
    fn build(
        &self,
        ty: &TypeDescriptor,
        components: &dyn ComponentLookup,
    ) -> Result<Arc<dyn Component>> {
        let factory = ty
            .factory
            .ok_or_else(|| Error::construction(&ty.simple_name, "no factory declared"))?;
        debug!(type_name = %ty.qualified_name(), "Constructing instance");
        factory(components).map_err(|e| Error::construction_with_source(&ty.simple_name, e))
    }
}

/// Calls operations through [`OperationDescriptor::handler`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlerInvoker;

impl Invoker for HandlerInvoker {
    fn invoke(
        &self,
        instance: &dyn Component,
        operation: &OperationDescriptor,
        point: &JoinPoint,
    ) -> Result<Value> {
        let handler = operation.handler.ok_or_else(|| {
            Error::configuration(format!(
                "Operation '{}' declares no handler",
                operation.name
            ))
        })?;
        handler(instance, point)
    }
}
