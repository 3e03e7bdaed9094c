//! Application Layer - Lucky IoC/AOP container
//!
//! The engine of the container: the registries, the start-up sequence that
//! fills them, and the dispatcher that runs intercepted calls through
//! advice.
//!
//! ## Architecture
//!
//! ```text
//! MetadataSource ──► ComponentPlan ──► ComponentRegistry ──► init hooks
//!       │                                     │
//!       └──────────► build_advice_registry ◄──┘
//!                            │
//!                            ▼
//!                     AdviceRegistry ──► JoinPointDispatcher ──► advice + target
//! ```
//!
//! ## Modules
//!
//! - [`registry`]: component and advice registries
//! - [`bootstrap`]: component planning, lifecycle hooks, aspect scanning
//! - [`dispatch`]: the join-point dispatcher
//! - [`metadata`]: linked (compile-time) and in-memory metadata sources
//! - [`construction`]: default `Constructor` and `Invoker`
//! - [`ports`]: the `DECLARED_TYPES` registration slice

pub mod bootstrap;
pub mod construction;
pub mod dispatch;
pub mod metadata;
pub mod ports;
pub mod registry;

pub use bootstrap::*;
pub use construction::{FactoryConstructor, HandlerInvoker};
pub use dispatch::{DispatchPhase, JoinPointDispatcher};
pub use metadata::{InMemoryMetadataSource, LinkedMetadataSource};
pub use registry::*;
