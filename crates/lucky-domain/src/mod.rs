//! # Domain Layer
//!
//! Core types of the Lucky IoC/AOP container, free of any registry or
//! runtime concerns.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`error`] | The container's error enum and `Result` alias |
//! | [`naming`] | Canonical naming transform used for ids |
//! | [`value_objects`] | Join-point ids, call context, dynamic values |
//! | [`ports`] | Capabilities the container consumes: metadata, construction, invocation |
//! | [`constants`] | Separators and reserved names |

pub mod constants;
pub mod error;
pub mod naming;
pub mod ports;
pub mod value_objects;

pub use error::{Error, ErrorKind, Result};
pub use naming::canonical_name;
pub use ports::*;
pub use value_objects::*;
