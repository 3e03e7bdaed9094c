//! Ports owned by the application layer

pub mod registry;

pub use registry::{
    DECLARED_TYPES, MarkerDeclaration, OperationDeclaration, TypeDeclaration, list_declared_types,
};
