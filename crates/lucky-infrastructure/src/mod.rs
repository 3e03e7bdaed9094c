//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the container.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML/env configuration through figment |
//! | [`constants`] | Configuration and logging constants |
//! | [`di`] | Runtime context (composition root) and initializer |
//! | [`error_ext`] | Context extensions mapping foreign errors into domain errors |
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use di::{RuntimeContext, RuntimeContextBuilder, RuntimeInitializer, init_runtime};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
