//! Capability ports consumed by the container

pub mod component;
pub mod construction;
pub mod metadata;

pub use component::{AroundAdvice, Component};
pub use construction::{ComponentLookup, Constructor, Invoker};
pub use metadata::{
    Factory, Marker, MarkerCategory, MetadataSource, OperationDescriptor, OperationHandler,
    TypeDescriptor, TypeShape,
};
