//! Start-up sequence: components, lifecycle hooks, aspects

pub mod aspects;
pub mod components;
pub mod lifecycle;

pub use aspects::{aspect_name, build_advice_registry};
pub use components::{ComponentPlan, PlannedComponent, component_id};
pub use lifecycle::{run_close_hooks, run_init_hooks};
