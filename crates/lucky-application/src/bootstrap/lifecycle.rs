//! Init-run and close-run hooks

use lucky_domain::error::{Error, Result};
use lucky_domain::ports::{Invoker, MarkerCategory, MetadataSource};
use lucky_domain::value_objects::JoinPoint;
use tracing::{info, warn};

use crate::bootstrap::components::{ComponentPlan, PlannedComponent};
use crate::registry::ComponentRegistry;

/// Run every `InitRun` operation, in component registration order
///
/// The first failure aborts; returns the number of hooks run.
pub fn run_init_hooks(
    metadata: &dyn MetadataSource,
    plan: &ComponentPlan,
    registry: &ComponentRegistry,
    invoker: &dyn Invoker,
) -> Result<usize> {
    let mut count = 0;
    for entry in plan.entries() {
        count += run_hooks(
            metadata,
            entry,
            registry,
            invoker,
            MarkerCategory::InitRun,
            &mut |_, err| Err(err),
        )?;
    }
    info!(hooks = count, "Init hooks complete");
    Ok(count)
}

/// Run every `CloseRun` operation, in reverse registration order
///
/// A failing hook does not stop the others; the first failure is returned
/// once all have run.
pub fn run_close_hooks(
    metadata: &dyn MetadataSource,
    plan: &ComponentPlan,
    registry: &ComponentRegistry,
    invoker: &dyn Invoker,
) -> Result<usize> {
    let mut count = 0;
    let mut first_error: Option<Error> = None;
    let mut record = |hook: &str, err: Error| -> Result<()> {
        warn!(hook = %hook, error = %err, "Close hook failed");
        first_error.get_or_insert(err);
        Ok(())
    };
    for entry in plan.entries().iter().rev() {
        count += run_hooks(
            metadata,
            entry,
            registry,
            invoker,
            MarkerCategory::CloseRun,
            &mut record,
        )?;
    }
    info!(hooks = count, "Close hooks complete");
    first_error.map_or(Ok(count), Err)
}

/// Runs the hooks of one component; `on_failure` decides whether to go on
fn run_hooks(
    metadata: &dyn MetadataSource,
    entry: &PlannedComponent,
    registry: &ComponentRegistry,
    invoker: &dyn Invoker,
    category: MarkerCategory,
    on_failure: &mut dyn FnMut(&str, Error) -> Result<()>,
) -> Result<usize> {
    let hooks = metadata.list_operations_with_marker(&entry.descriptor, category);
    if hooks.is_empty() {
        return Ok(0);
    }
    let instance = match registry.get(&entry.id) {
        Ok(instance) => instance,
        Err(err) => {
            on_failure(&entry.id, err)?;
            return Ok(0);
        }
    };
    let mut ran = 0;
    for hook in &hooks {
        info!(component = %entry.id, hook = %hook.name, kind = %category, "Running lifecycle hook");
        let point = JoinPoint::of(&entry.descriptor, &hook.name, Vec::new())
            .with_target(instance.clone());
        match invoker.invoke(instance.as_ref(), hook, &point) {
            Ok(_) => ran += 1,
            Err(err) => on_failure(&hook.name, err)?,
        }
    }
    Ok(ran)
}
