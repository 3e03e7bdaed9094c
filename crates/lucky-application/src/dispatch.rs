//! Join-Point Dispatcher
//!
//! Runs an intercepted call through the advice bound to it:
//!
//! ```text
//! NOT_STARTED → BEFORE_RUN → TARGET_RUN → AFTER_RUN → DONE
//!                                 │
//!                      around-advice decides here
//!                      (skip / once / many times)
//! ```
//!
//! - Every declared id is resolved before anything runs; an unknown id fails
//!   the call with a lookup error.
//! - A failing before-advice aborts the call: neither the target nor any
//!   after-advice runs.
//! - After-advice always runs once the target phase has started, and sees
//!   the outcome. A target failure wins over after-advice failures.
//! - The dispatcher never retries, wraps or swallows errors from advice or
//!   target.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lucky_domain::constants::SIGNATURE_SEPARATOR;
use lucky_domain::error::{Error, Result};
use lucky_domain::ports::{AroundAdvice, Invoker, MarkerCategory, MetadataSource};
use lucky_domain::value_objects::{JoinPoint, Outcome, ProceedingJoinPoint, TargetFn, Value};
use tracing::{debug, trace, warn};

use crate::registry::{AdviceRegistry, PointRun, TargetedLocation};

/// Progress of one dispatched call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchPhase {
    /// Nothing ran yet
    NotStarted,
    /// Before-advice running
    BeforeRun,
    /// Target (or around-advice) running
    TargetRun,
    /// After-advice running
    AfterRun,
    /// Finished, with a result or an error
    Done,
}

impl fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "NOT_STARTED",
            Self::BeforeRun => "BEFORE_RUN",
            Self::TargetRun => "TARGET_RUN",
            Self::AfterRun => "AFTER_RUN",
            Self::Done => "DONE",
        })
    }
}

/// Advice resolved for one call, split by location
#[derive(Default)]
struct AdvicePlan<'r> {
    before: Vec<(&'r str, &'r PointRun)>,
    around: Option<(&'r str, &'r dyn AroundAdvice)>,
    after: Vec<(&'r str, &'r PointRun)>,
}

/// Dispatches intercepted calls through the advice registry
///
/// Join-point bindings declared on target operations are read once, when
/// the dispatcher is created.
pub struct JoinPointDispatcher {
    advice: Arc<AdviceRegistry>,
    invoker: Arc<dyn Invoker>,
    bindings: HashMap<String, Vec<String>>,
}

impl JoinPointDispatcher {
    /// Create a dispatcher, collecting `JoinPoint` markers from `metadata`
    pub fn new(
        advice: Arc<AdviceRegistry>,
        invoker: Arc<dyn Invoker>,
        metadata: &dyn MetadataSource,
    ) -> Self {
        let mut bindings: HashMap<String, Vec<String>> = HashMap::new();
        for ty in metadata.list_types() {
            let qualified = ty.qualified_name();
            for operation in metadata.list_operations_with_marker(&ty, MarkerCategory::JoinPoint) {
                let key = binding_key(&qualified, &operation.name);
                let ids = operation.join_points().map(str::to_string).collect();
                if bindings.insert(key.clone(), ids).is_some() {
                    warn!(operation = %key, "Operation declared twice, keeping the last join points");
                }
            }
        }
        debug!(bound_operations = bindings.len(), "Join point dispatcher ready");
        Self {
            advice,
            invoker,
            bindings,
        }
    }

    /// The advice registry calls are resolved against
    pub fn advice(&self) -> &AdviceRegistry {
        &self.advice
    }

    /// Join-point ids declared on `method` of the type named `qualified_type`
    /// (`module::Type`, or the simple name for types without a module path),
    /// in declaration order
    pub fn declared_join_points(&self, qualified_type: &str, method: &str) -> &[String] {
        self.bindings
            .get(&binding_key(qualified_type, method))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Dispatch a call through the join points declared on its operation
    ///
    /// The operation is looked up by [`JoinPoint::qualified_type`], so types
    /// sharing a simple name in different modules keep separate bindings.
    /// Operations without declared join points call `target` directly.
    pub fn dispatch(&self, point: &JoinPoint, target: &TargetFn<'_>) -> Result<Value> {
        let ids = self.declared_join_points(&point.qualified_type(), point.method());
        self.dispatch_with(ids, point, target)
    }

    /// Dispatch a call through an explicit list of join-point ids
    pub fn dispatch_with<S: AsRef<str>>(
        &self,
        ids: &[S],
        point: &JoinPoint,
        target: &TargetFn<'_>,
    ) -> Result<Value> {
        let plan = self.resolve(ids, point)?;
        let mut phase = DispatchPhase::NotStarted;

        enter(&mut phase, DispatchPhase::BeforeRun, point);
        for (id, run) in &plan.before {
            if let Err(err) = run.run_targeted(self.invoker.as_ref(), point) {
                debug!(join_point = %id, error = %err, "Before advice failed, call aborted");
                enter(&mut phase, DispatchPhase::Done, point);
                return Err(err);
            }
        }

        enter(&mut phase, DispatchPhase::TargetRun, point);
        let result = match plan.around {
            Some((id, advice)) => {
                let proceeding = ProceedingJoinPoint::new(point, target);
                let result = advice.around(&proceeding);
                debug!(
                    join_point = %id,
                    proceeded = proceeding.proceed_count(),
                    "Around advice completed"
                );
                result
            }
            None => target(point.args()),
        };

        if plan.after.is_empty() {
            enter(&mut phase, DispatchPhase::Done, point);
            return result;
        }

        enter(&mut phase, DispatchPhase::AfterRun, point);
        let observed = point.with_outcome(Outcome::from_result(&result));
        let mut after_error: Option<Error> = None;
        for (id, run) in &plan.after {
            if let Err(err) = run.run_targeted(self.invoker.as_ref(), &observed) {
                if result.is_err() || after_error.is_some() {
                    warn!(join_point = %id, error = %err, "After advice failed after an earlier failure");
                } else {
                    after_error = Some(err);
                }
            }
        }

        enter(&mut phase, DispatchPhase::Done, point);
        match (result, after_error) {
            (Ok(_), Some(err)) => Err(err),
            (result, _) => result,
        }
    }

    fn resolve<'r, S: AsRef<str>>(
        &'r self,
        ids: &'r [S],
        point: &JoinPoint,
    ) -> Result<AdvicePlan<'r>> {
        let mut plan = AdvicePlan::default();
        for id in ids {
            let id = id.as_ref();
            match self.advice.get(id)? {
                PointRun::Around { advice, .. } => {
                    if let Some((first, _)) = plan.around {
                        return Err(Error::configuration(format!(
                            "{} binds more than one around advice ('{first}' and '{id}')",
                            point.signature()
                        )));
                    }
                    plan.around = Some((id, advice.as_ref()));
                }
                run @ PointRun::Targeted {
                    location: TargetedLocation::Before,
                    ..
                } => plan.before.push((id, run)),
                run @ PointRun::Targeted {
                    location: TargetedLocation::After,
                    ..
                } => plan.after.push((id, run)),
            }
        }
        Ok(plan)
    }
}

impl fmt::Debug for JoinPointDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinPointDispatcher")
            .field("join_points", &self.advice.len())
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

fn binding_key(target_type: &str, method: &str) -> String {
    format!("{target_type}{SIGNATURE_SEPARATOR}{method}")
}

fn enter(phase: &mut DispatchPhase, next: DispatchPhase, point: &JoinPoint) {
    trace!(signature = %point.signature(), from = %phase, to = %next, "Dispatch phase");
    *phase = next;
}
