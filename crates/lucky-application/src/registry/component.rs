//! Component Registry
//!
//! Holds one instance per component id. Registration happens during
//! bootstrap; afterwards the registry is only read, from any number of
//! threads.

use std::any::type_name;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use lucky_domain::error::{Error, Result};
use lucky_domain::ports::{Component, ComponentLookup};
use tracing::{debug, info};

/// Process-wide map of component id to instance
#[derive(Default)]
pub struct ComponentRegistry {
    components: DashMap<String, Arc<dyn Component>>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `instance` under `id`
    ///
    /// Fails with [`Error::DuplicateComponent`] if `id` is taken; the
    /// existing instance is left in place.
    pub fn register(&self, id: impl Into<String>, instance: Arc<dyn Component>) -> Result<()> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::configuration("Component id cannot be empty"));
        }
        match self.components.entry(id) {
            Entry::Occupied(entry) => Err(Error::duplicate_component(entry.key().clone())),
            Entry::Vacant(entry) => {
                info!(component = %entry.key(), "Registered component");
                entry.insert(instance);
                Ok(())
            }
        }
    }

    /// Component registered under `id`
    pub fn get(&self, id: &str) -> Result<Arc<dyn Component>> {
        debug!(component = %id, "Component lookup");
        self.components
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| Error::component_not_found(id))
    }

    /// Component registered under `id`, downcast to `T`
    pub fn get_as<T: Component>(&self, id: &str) -> Result<Arc<T>> {
        self.get(id)?
            .downcast_arc::<T>()
            .map_err(|_| Error::component_type_mismatch(id, type_name::<T>()))
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.components.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentLookup for ComponentRegistry {
    fn lookup(&self, id: &str) -> Result<Arc<dyn Component>> {
        self.get(id)
    }

    fn contains(&self, id: &str) -> bool {
        ComponentRegistry::contains(self, id)
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
