//! # Lucky
//!
//! An inversion-of-control container with aspect-oriented join points.
//!
//! Types are declared once, at compile time, with markers saying what they
//! are: components the container builds and wires, or aspects whose
//! operations run around, before or after other calls. Intercepted calls
//! are dispatched through the advice bound to their join points.
//!
//! ## Example
//!
//! ```ignore
//! use lucky::prelude::*;
//!
//! let context = RuntimeContext::builder(AppConfig::default()).build()?;
//! let receipt = context.dispatch(
//!     &JoinPoint::new("Checkout", "pay", vec![json!(42)]).in_module(module_path!()),
//!     &|args| charge(args),
//! )?;
//! context.shutdown()?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Descriptors, call values, capability traits, errors
//! - `application` - Component and advice registries, bootstrap, dispatcher
//! - `infrastructure` - Configuration, logging, the runtime context

/// Domain layer - descriptors, capabilities and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use lucky_domain::*;
}

/// Application layer - registries, bootstrap and dispatch
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use lucky_application::*;
}

/// Infrastructure layer - config, logging and the runtime context
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use lucky_infrastructure::*;
}

/// Everything needed to declare types and run a container
pub mod prelude {
    pub use lucky_application::ports::registry::{
        DECLARED_TYPES, MarkerDeclaration, OperationDeclaration, TypeDeclaration,
    };
    pub use lucky_application::{InMemoryMetadataSource, JoinPointDispatcher, LinkedMetadataSource};
    pub use lucky_domain::error::{Error, ErrorKind, Result};
    pub use lucky_domain::ports::{
        AroundAdvice, Component, ComponentLookup, Marker, MarkerCategory, MetadataSource,
        OperationDescriptor, TypeDescriptor, TypeShape,
    };
    pub use lucky_domain::value_objects::{
        JoinPoint, JoinPointId, Outcome, ProceedingJoinPoint, Value,
    };
    pub use lucky_infrastructure::{AppConfig, RuntimeContext, RuntimeInitializer};
    pub use serde_json::json;
}

// Re-export commonly used domain types at the crate root
pub use domain::{Error, ErrorKind, Result};

// Re-export the composition root at the crate root
pub use infrastructure::{AppConfig, RuntimeContext, RuntimeContextBuilder, init_runtime};
