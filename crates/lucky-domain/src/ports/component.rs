//! Component and around-advice capabilities

use std::sync::Arc;

use downcast_rs::{DowncastSync, impl_downcast};

use crate::error::Result;
use crate::value_objects::{ProceedingJoinPoint, Value};

/// An application object managed by the container
///
/// Registries store components as `Arc<dyn Component>`; callers recover the
/// concrete type with `downcast_arc` / `downcast_ref`.
///
/// ```ignore
/// struct OrderService;
/// impl Component for OrderService {}
/// ```
pub trait Component: DowncastSync {
    /// Expose the around-advice capability of this component, if it has one
    ///
    /// Types declared with the around shape must override this with
    /// `Some(self)`; the advice registry rejects them otherwise.
    fn into_around(self: Arc<Self>) -> Option<Arc<dyn AroundAdvice>> {
        None
    }
}
impl_downcast!(sync Component);

/// Around-style advice: owns the decision of whether the real call happens
pub trait AroundAdvice: Send + Sync {
    /// Handle one intercepted call and supply its result
    ///
    /// Calling `point.proceed()` runs the real invocation; not calling it
    /// short-circuits the call, calling it repeatedly retries it.
    fn around(&self, point: &ProceedingJoinPoint<'_>) -> Result<Value>;
}
