//! Advice registry bootstrap
//!
//! Scans `Aspect`-marked types and derives one [`PointRun`] per advice slot:
//!
//! - around-shaped types bind `<aspectName>.proceed`;
//! - otherwise every `Before`/`After` operation binds
//!   `<aspectName>.<pointName>`, all sharing one aspect instance.
//!
//! A duplicate id aborts the scan immediately and nothing is published.

use std::sync::Arc;

use lucky_domain::error::{Error, Result};
use lucky_domain::naming::canonical_name;
use lucky_domain::ports::{
    Component, Constructor, Marker, MarkerCategory, MetadataSource, TypeDescriptor, TypeShape,
};
use lucky_domain::value_objects::JoinPointId;
use tracing::{debug, info};

use crate::bootstrap::components::component_id;
use crate::registry::{
    AdviceRegistry, AdviceRegistryBuilder, ComponentRegistry, PointRun, TargetedLocation,
};

/// Aspect name of `ty`: its aspect marker override or its canonical name
pub fn aspect_name(ty: &TypeDescriptor) -> String {
    canonical_name(
        &ty.simple_name,
        ty.marker(MarkerCategory::Aspect)
            .and_then(Marker::override_name),
    )
}

/// Build the advice registry from every aspect visible through `metadata`
pub fn build_advice_registry(
    metadata: &dyn MetadataSource,
    constructor: &dyn Constructor,
    components: &ComponentRegistry,
) -> Result<AdviceRegistry> {
    let aspects = metadata.list_types_with_marker(MarkerCategory::Aspect);
    info!(aspects = aspects.len(), "Scanning aspect types");

    let mut builder = AdviceRegistry::builder();
    for ty in &aspects {
        register_aspect(constructor, components, ty, &mut builder)?;
    }

    let registry = builder.build();
    info!(join_points = registry.len(), "Advice registry built");
    Ok(registry)
}

fn register_aspect(
    constructor: &dyn Constructor,
    components: &ComponentRegistry,
    ty: &TypeDescriptor,
    builder: &mut AdviceRegistryBuilder,
) -> Result<()> {
    let name = aspect_name(ty);
    let instance = aspect_instance(constructor, components, ty)?;

    if ty.shape == TypeShape::Around {
        let advice = instance.into_around().ok_or_else(|| {
            Error::malformed_aspect(
                &ty.simple_name,
                "declared with the around shape but provides no around advice",
            )
        })?;
        let id = JoinPointId::around(name);
        return builder.add(id.to_string(), PointRun::around(&ty.simple_name, advice));
    }

    for operation in &ty.operations {
        let (location, marker) = if let Some(marker) = operation.marker(MarkerCategory::Before) {
            (TargetedLocation::Before, marker)
        } else if let Some(marker) = operation.marker(MarkerCategory::After) {
            (TargetedLocation::After, marker)
        } else {
            continue;
        };
        let point = canonical_name(&operation.name, marker.override_name());
        let id = JoinPointId::new(name.as_str(), point);
        builder.add(
            id.to_string(),
            PointRun::targeted(
                &ty.simple_name,
                Arc::clone(&instance),
                operation.clone(),
                location,
            ),
        )?;
    }
    debug!(aspect = %name, operations = ty.operations.len(), "Aspect scanned");
    Ok(())
}

/// The single instance backing all advice of `ty`
///
/// Aspects that are also registered components reuse the registered
/// instance.
fn aspect_instance(
    constructor: &dyn Constructor,
    components: &ComponentRegistry,
    ty: &TypeDescriptor,
) -> Result<Arc<dyn Component>> {
    if ty.has_marker(MarkerCategory::Component) {
        let id = component_id(ty);
        if components.contains(&id) {
            debug!(aspect = %ty.simple_name, component = %id, "Reusing component instance for aspect");
            return components.get(&id);
        }
    }
    constructor.build(ty, components)
}
