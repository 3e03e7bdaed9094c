//! Container composition
//!
//! [`RuntimeContext`] is the composition root; [`RuntimeInitializer`] wraps
//! it with configuration loading and logging set-up.

pub mod bootstrap;
pub mod initializer;

pub use bootstrap::{RuntimeContext, RuntimeContextBuilder, init_runtime};
pub use initializer::RuntimeInitializer;
