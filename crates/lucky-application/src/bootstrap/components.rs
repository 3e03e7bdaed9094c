//! Component bootstrap
//!
//! Turns the `Component`-marked types of a metadata source into an ordered
//! [`ComponentPlan`] and registers one instance per planned id. Declared
//! dependencies are built before their dependents; otherwise discovery
//! order is kept, so the same declarations always bootstrap the same way.

use std::collections::HashMap;

use lucky_domain::error::{Error, Result};
use lucky_domain::naming::canonical_name;
use lucky_domain::ports::{
    ComponentLookup, Constructor, Marker, MarkerCategory, MetadataSource, TypeDescriptor,
};
use tracing::{debug, info};

use crate::registry::ComponentRegistry;

/// Component id of `ty`: its component marker override or its canonical name
pub fn component_id(ty: &TypeDescriptor) -> String {
    canonical_name(
        &ty.simple_name,
        ty.marker(MarkerCategory::Component)
            .and_then(Marker::override_name),
    )
}

/// One component scheduled for construction
#[derive(Debug, Clone)]
pub struct PlannedComponent {
    /// Registry id
    pub id: String,
    /// Declaration
    pub descriptor: TypeDescriptor,
}

/// Dependency-ordered list of components to build
#[derive(Debug, Clone, Default)]
pub struct ComponentPlan {
    entries: Vec<PlannedComponent>,
}

impl ComponentPlan {
    /// Plan every component visible through `metadata`
    ///
    /// Dependencies may also point at components already present in
    /// `existing` (registered by hand before bootstrap).
    pub fn from_metadata(
        metadata: &dyn MetadataSource,
        existing: &dyn ComponentLookup,
    ) -> Result<Self> {
        let candidates: Vec<PlannedComponent> = metadata
            .list_types_with_marker(MarkerCategory::Component)
            .into_iter()
            .map(|descriptor| PlannedComponent {
                id: component_id(&descriptor),
                descriptor,
            })
            .collect();

        let mut index = HashMap::with_capacity(candidates.len());
        for (position, candidate) in candidates.iter().enumerate() {
            if index.insert(candidate.id.as_str(), position).is_some()
                || existing.contains(&candidate.id)
            {
                return Err(Error::duplicate_component(candidate.id.clone()));
            }
        }

        let mut planner = Planner {
            candidates: &candidates,
            index,
            existing,
            marks: vec![Mark::Unvisited; candidates.len()],
            path: Vec::new(),
            ordered: Vec::with_capacity(candidates.len()),
        };
        for position in 0..candidates.len() {
            planner.visit(position)?;
        }

        let entries = planner
            .ordered
            .iter()
            .map(|&position| candidates[position].clone())
            .collect();
        Ok(Self { entries })
    }

    /// Planned components in construction order
    pub fn entries(&self) -> &[PlannedComponent] {
        &self.entries
    }

    /// Planned ids in construction order
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Number of planned components
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is planned
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Construct and register every planned component, in order
    ///
    /// Stops at the first failure; components registered before it stay
    /// registered.
    pub fn register_all(
        &self,
        constructor: &dyn Constructor,
        registry: &ComponentRegistry,
    ) -> Result<()> {
        for entry in &self.entries {
            debug!(component = %entry.id, type_name = %entry.descriptor.qualified_name(), "Building component");
            let instance = constructor.build(&entry.descriptor, registry)?;
            registry.register(entry.id.clone(), instance)?;
        }
        info!(count = self.entries.len(), "Component bootstrap complete");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

struct Planner<'a> {
    candidates: &'a [PlannedComponent],
    index: HashMap<&'a str, usize>,
    existing: &'a dyn ComponentLookup,
    marks: Vec<Mark>,
    path: Vec<usize>,
    ordered: Vec<usize>,
}

impl Planner<'_> {
    fn visit(&mut self, position: usize) -> Result<()> {
        match self.marks[position] {
            Mark::Done => return Ok(()),
            Mark::Visiting => return Err(self.cycle_error(position)),
            Mark::Unvisited => {}
        }
        self.marks[position] = Mark::Visiting;
        self.path.push(position);

        let candidate = &self.candidates[position];
        for dependency in &candidate.descriptor.depends_on {
            match self.index.get(dependency.as_str()) {
                Some(&next) => self.visit(next)?,
                None if self.existing.contains(dependency) => {}
                None => {
                    return Err(Error::configuration(format!(
                        "Component '{}' depends on unknown component '{}'",
                        candidate.id, dependency
                    )));
                }
            }
        }

        self.path.pop();
        self.marks[position] = Mark::Done;
        self.ordered.push(position);
        Ok(())
    }

    fn cycle_error(&self, position: usize) -> Error {
        let start = self
            .path
            .iter()
            .position(|&p| p == position)
            .unwrap_or_default();
        let mut cycle: Vec<&str> = self.path[start..]
            .iter()
            .map(|&p| self.candidates[p].id.as_str())
            .collect();
        cycle.push(self.candidates[position].id.as_str());
        Error::configuration(format!(
            "Component dependency cycle: {}",
            cycle.join(" -> ")
        ))
    }
}
