//! Advice Registry
//!
//! Maps each join-point id to exactly one [`PointRun`]. The registry is
//! assembled through [`AdviceRegistryBuilder`] during bootstrap and is
//! immutable once built, so dispatch needs no locking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lucky_domain::error::{Error, Result};
use lucky_domain::ports::{AroundAdvice, Component, Invoker, OperationDescriptor};
use lucky_domain::value_objects::JoinPoint;
use tracing::{debug, info};

/// Where advice runs relative to the real invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdviceLocation {
    /// Controls the real invocation
    Around,
    /// Runs before it
    Before,
    /// Runs after it, success or failure
    After,
}

impl fmt::Display for AdviceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Around => "Around",
            Self::Before => "Before",
            Self::After => "After",
        })
    }
}

/// Which side of the call a targeted method observes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetedLocation {
    /// Before the real invocation
    Before,
    /// After the real invocation
    After,
}

/// One dispatchable advice wrapper
pub enum PointRun {
    /// Around-style advice owning the proceed decision
    Around {
        /// Simple name of the aspect type
        aspect_type: String,
        /// The advice object
        advice: Arc<dyn AroundAdvice>,
    },
    /// One observational operation of an aspect instance
    Targeted {
        /// Simple name of the aspect type
        aspect_type: String,
        /// Shared aspect instance
        instance: Arc<dyn Component>,
        /// The advice operation
        operation: OperationDescriptor,
        /// Before or after
        location: TargetedLocation,
    },
}

impl PointRun {
    /// Wrap around-style advice
    pub fn around(aspect_type: impl Into<String>, advice: Arc<dyn AroundAdvice>) -> Self {
        Self::Around {
            aspect_type: aspect_type.into(),
            advice,
        }
    }

    /// Wrap one before/after operation of an aspect instance
    pub fn targeted(
        aspect_type: impl Into<String>,
        instance: Arc<dyn Component>,
        operation: OperationDescriptor,
        location: TargetedLocation,
    ) -> Self {
        Self::Targeted {
            aspect_type: aspect_type.into(),
            instance,
            operation,
            location,
        }
    }

    /// Where this advice runs
    pub fn location(&self) -> AdviceLocation {
        match self {
            Self::Around { .. } => AdviceLocation::Around,
            Self::Targeted {
                location: TargetedLocation::Before,
                ..
            } => AdviceLocation::Before,
            Self::Targeted {
                location: TargetedLocation::After,
                ..
            } => AdviceLocation::After,
        }
    }

    /// Simple name of the declaring aspect type
    pub fn aspect_type(&self) -> &str {
        match self {
            Self::Around { aspect_type, .. } | Self::Targeted { aspect_type, .. } => aspect_type,
        }
    }

    /// Run targeted advice, discarding its return value; no-op for around-advice
    pub fn run_targeted(&self, invoker: &dyn Invoker, point: &JoinPoint) -> Result<()> {
        match self {
            Self::Targeted {
                instance,
                operation,
                ..
            } => invoker
                .invoke(instance.as_ref(), operation, point)
                .map(|_| ()),
            Self::Around { .. } => Ok(()),
        }
    }
}

impl fmt::Debug for PointRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Around { aspect_type, .. } => f
                .debug_struct("PointRun::Around")
                .field("aspect_type", aspect_type)
                .finish_non_exhaustive(),
            Self::Targeted {
                aspect_type,
                operation,
                location,
                ..
            } => f
                .debug_struct("PointRun::Targeted")
                .field("aspect_type", aspect_type)
                .field("operation", &operation.name)
                .field("location", location)
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for PointRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Around { aspect_type, .. } => write!(f, "{aspect_type}"),
            Self::Targeted {
                aspect_type,
                operation,
                ..
            } => write!(f, "{aspect_type}::{}", operation.name),
        }
    }
}

/// Read-only join-point table
#[derive(Debug, Default)]
pub struct AdviceRegistry {
    points: HashMap<String, PointRun>,
    ids: Vec<String>,
}

impl AdviceRegistry {
    /// Start assembling a registry
    pub fn builder() -> AdviceRegistryBuilder {
        AdviceRegistryBuilder::default()
    }

    /// Whether `id` is bound
    pub fn contains(&self, id: &str) -> bool {
        self.points.contains_key(id)
    }

    /// Advice bound to `id`
    pub fn get(&self, id: &str) -> Result<&PointRun> {
        debug!(join_point = %id, "Advice lookup");
        self.points
            .get(id)
            .ok_or_else(|| Error::join_point_not_found(id))
    }

    /// Bound ids in registration order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Bound ids with their advice, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PointRun)> {
        self.ids
            .iter()
            .filter_map(|id| self.points.get(id).map(|run| (id.as_str(), run)))
    }

    /// Number of bound join points
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Mutable staging area for an [`AdviceRegistry`]
#[derive(Debug, Default)]
pub struct AdviceRegistryBuilder {
    registry: AdviceRegistry,
}

impl AdviceRegistryBuilder {
    /// Bind `run` to `id`
    ///
    /// Fails with [`Error::DuplicateJoinPoint`] if `id` is already bound; the
    /// first binding is kept untouched.
    pub fn add(&mut self, id: impl Into<String>, run: PointRun) -> Result<()> {
        let id = id.into();
        if self.registry.points.contains_key(&id) {
            return Err(Error::duplicate_join_point(id));
        }
        info!(
            location = %run.location(),
            join_point = %id,
            aspect = %run,
            "Registered advice"
        );
        self.registry.ids.push(id.clone());
        self.registry.points.insert(id, run);
        Ok(())
    }

    /// Whether `id` is already bound
    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    /// Freeze the registry
    pub fn build(self) -> AdviceRegistry {
        self.registry
    }
}
