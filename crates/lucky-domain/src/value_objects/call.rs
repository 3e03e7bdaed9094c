//! Call context passed to advice
//!
//! A [`JoinPoint`] describes one intercepted call: which type (and the
//! module declaring it) and method, the receiving instance when there is one, the arguments and, for
//! after-advice, how the real invocation ended. Around-advice receives a
//! [`ProceedingJoinPoint`] that additionally carries the real invocation.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::SIGNATURE_SEPARATOR;
use crate::error::Result;
use crate::ports::{Component, TypeDescriptor};

/// Dynamic value crossing the dispatcher (arguments and results)
pub type Value = serde_json::Value;

/// The un-intercepted invocation of a target operation
pub type TargetFn<'a> = dyn Fn(&[Value]) -> Result<Value> + 'a;

/// How a real invocation ended, as seen by after-advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// The target returned normally
    Returned(Value),
    /// The target raised an error
    Failed {
        /// Rendered error message
        message: String,
    },
}

impl Outcome {
    /// Snapshot a result without consuming it
    pub fn from_result(result: &Result<Value>) -> Self {
        match result {
            Ok(value) => Self::Returned(value.clone()),
            Err(err) => Self::Failed {
                message: err.to_string(),
            },
        }
    }

    /// True when the target failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returned value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Returned(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

/// Description of one intercepted call
#[derive(Clone)]
pub struct JoinPoint {
    target_type: String,
    module_path: String,
    target: Option<Arc<dyn Component>>,
    method: String,
    args: Vec<Value>,
    outcome: Option<Outcome>,
}

impl JoinPoint {
    /// Describe a call of `target_type::method` with `args`
    pub fn new(target_type: impl Into<String>, method: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            target_type: target_type.into(),
            module_path: String::new(),
            target: None,
            method: method.into(),
            args,
            outcome: None,
        }
    }

    /// Describe a call of `method` on the type `descriptor` declares
    pub fn of(descriptor: &TypeDescriptor, method: impl Into<String>, args: Vec<Value>) -> Self {
        Self::new(&descriptor.simple_name, method, args).in_module(&descriptor.module_path)
    }

    /// Module path declaring the target type
    #[must_use]
    pub fn in_module(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = module_path.into();
        self
    }

    /// Attach the receiving instance
    #[must_use]
    pub fn with_target(mut self, target: Arc<dyn Component>) -> Self {
        self.target = Some(target);
        self
    }

    /// Copy of this call context carrying the target's outcome
    #[must_use]
    pub fn with_outcome(&self, outcome: Outcome) -> Self {
        let mut point = self.clone();
        point.outcome = Some(outcome);
        point
    }

    /// Simple name of the target type
    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    /// Module path declaring the target type; empty when unknown
    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    /// `module::Type`, or the simple name when no module path is set
    ///
    /// Matches [`TypeDescriptor::qualified_name`] of the declaring type.
    pub fn qualified_type(&self) -> String {
        if self.module_path.is_empty() {
            self.target_type.clone()
        } else {
            format!("{}{}{}", self.module_path, SIGNATURE_SEPARATOR, self.target_type)
        }
    }

    /// Receiving instance, when the call has one
    pub fn target(&self) -> Option<&Arc<dyn Component>> {
        self.target.as_ref()
    }

    /// Method name
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Call arguments
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Argument at `index`
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Outcome of the real invocation; only set for after-advice
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// `Type::method`
    pub fn signature(&self) -> String {
        format!("{}{}{}", self.target_type, SIGNATURE_SEPARATOR, self.method)
    }
}

impl fmt::Debug for JoinPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinPoint")
            .field("signature", &self.signature())
            .field("module_path", &self.module_path)
            .field("has_target", &self.target.is_some())
            .field("args", &self.args)
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// Call context handed to around-advice together with the real invocation
///
/// The advice decides whether and how often the target runs: `proceed` may
/// be called zero, one or many times.
pub struct ProceedingJoinPoint<'a> {
    point: &'a JoinPoint,
    target: &'a TargetFn<'a>,
    proceeded: Cell<usize>,
}

impl<'a> ProceedingJoinPoint<'a> {
    /// Wrap a call context and its real invocation
    pub fn new(point: &'a JoinPoint, target: &'a TargetFn<'a>) -> Self {
        Self {
            point,
            target,
            proceeded: Cell::new(0),
        }
    }

    /// The intercepted call
    pub fn join_point(&self) -> &JoinPoint {
        self.point
    }

    /// Original call arguments
    pub fn args(&self) -> &[Value] {
        self.point.args()
    }

    /// Run the real invocation with the original arguments
    pub fn proceed(&self) -> Result<Value> {
        self.proceed_with(self.point.args())
    }

    /// Run the real invocation with replacement arguments
    pub fn proceed_with(&self, args: &[Value]) -> Result<Value> {
        self.proceeded.set(self.proceeded.get() + 1);
        (self.target)(args)
    }

    /// How many times the real invocation has been run so far
    pub fn proceed_count(&self) -> usize {
        self.proceeded.get()
    }
}

impl fmt::Debug for ProceedingJoinPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProceedingJoinPoint")
            .field("join_point", self.point)
            .field("proceeded", &self.proceeded.get())
            .finish_non_exhaustive()
    }
}
