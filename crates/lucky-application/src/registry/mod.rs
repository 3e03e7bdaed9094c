//! Registries built at bootstrap and read at call time

pub mod advice;
pub mod component;

pub use advice::{AdviceLocation, AdviceRegistry, AdviceRegistryBuilder, PointRun, TargetedLocation};
pub use component::ComponentRegistry;
