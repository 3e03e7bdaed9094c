//! Value objects

pub mod call;
pub mod join_point_id;

pub use call::{JoinPoint, Outcome, ProceedingJoinPoint, TargetFn, Value};
pub use join_point_id::JoinPointId;
