//! Runtime context tests: bootstrap, lazy advice, dispatch, shutdown

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lucky_application::InMemoryMetadataSource;
use lucky_domain::error::{Error, Result};
use lucky_domain::ports::{
    Component, ComponentLookup, Factory, Marker, MarkerCategory, OperationDescriptor,
    TypeDescriptor,
};
use lucky_domain::value_objects::{JoinPoint, Outcome, Value};
use lucky_infrastructure::config::AppConfig;
use lucky_infrastructure::di::RuntimeContext;
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Default)]
struct Journal {
    lines: Mutex<Vec<String>>,
}

impl Journal {
    fn write(&self, line: impl Into<String>) {
        self.lines.lock().unwrap().push(line.into());
    }

    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Component for Journal {}

struct Inventory {
    journal: Arc<Journal>,
}

impl Component for Inventory {}

fn inventory_factory(components: &dyn ComponentLookup) -> Result<Arc<dyn Component>> {
    Ok(Arc::new(Inventory {
        journal: components.lookup_as::<Journal>("journal")?,
    }))
}

fn inventory_load(instance: &dyn Component, _: &JoinPoint) -> Result<Value> {
    let inventory = instance
        .downcast_ref::<Inventory>()
        .ok_or_else(|| Error::internal("not an inventory"))?;
    inventory.journal.write("inventory loaded");
    Ok(Value::Null)
}

fn inventory_flush(instance: &dyn Component, _: &JoinPoint) -> Result<Value> {
    let inventory = instance
        .downcast_ref::<Inventory>()
        .ok_or_else(|| Error::internal("not an inventory"))?;
    inventory.journal.write("inventory flushed");
    Ok(Value::Null)
}

fn inventory() -> TypeDescriptor {
    TypeDescriptor::new("Inventory")
        .with_marker(Marker::new(MarkerCategory::Component))
        .depends_on("journal")
        .with_operation(
            OperationDescriptor::new("load")
                .with_marker(Marker::new(MarkerCategory::InitRun))
                .with_handler(inventory_load),
        )
        .with_operation(
            OperationDescriptor::new("flush")
                .with_marker(Marker::new(MarkerCategory::CloseRun))
                .with_handler(inventory_flush),
        )
        .with_factory(inventory_factory)
}

struct StockAudit {
    journal: Arc<Journal>,
}

impl Component for StockAudit {}

fn stock_audit_after(instance: &dyn Component, point: &JoinPoint) -> Result<Value> {
    let audit = instance
        .downcast_ref::<StockAudit>()
        .ok_or_else(|| Error::internal("not a stock audit"))?;
    if let Some(Outcome::Returned(value)) = point.outcome() {
        audit.journal.write(format!("{} returned {value}", point.signature()));
    }
    Ok(Value::Null)
}

fn stock_audit(factory: Factory) -> TypeDescriptor {
    TypeDescriptor::new("StockAudit")
        .with_marker(Marker::new(MarkerCategory::Aspect))
        .with_operation(
            OperationDescriptor::new("reserved")
                .with_marker(Marker::new(MarkerCategory::After))
                .with_handler(stock_audit_after),
        )
        .with_factory(factory)
}

fn stock_audit_factory(components: &dyn ComponentLookup) -> Result<Arc<dyn Component>> {
    Ok(Arc::new(StockAudit {
        journal: components.lookup_as::<Journal>("journal")?,
    }))
}

fn reservations() -> TypeDescriptor {
    TypeDescriptor::new("Reservations").with_operation(
        OperationDescriptor::new("reserve").with_join_point("stockAudit.reserved"),
    )
}

fn metadata(audit_factory: Factory) -> Arc<InMemoryMetadataSource> {
    Arc::new(
        InMemoryMetadataSource::new()
            .with_type(inventory())
            .with_type(stock_audit(audit_factory))
            .with_type(reservations()),
    )
}

fn context_with(
    config: AppConfig,
    audit_factory: Factory,
) -> (RuntimeContext, Arc<Journal>) {
    let journal = Arc::new(Journal::default());
    let context = RuntimeContext::builder(config)
        .with_metadata_source(metadata(audit_factory))
        .with_component("journal", journal.clone())
        .build()
        .unwrap();
    (context, journal)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_build_registers_components_and_runs_init_hooks() {
    let (context, journal) = context_with(AppConfig::default(), stock_audit_factory);

    assert_eq!(context.components().ids(), vec!["inventory", "journal"]);
    assert_eq!(context.plan().ids(), vec!["inventory"]);
    assert_eq!(journal.lines(), vec!["inventory loaded"]);
    assert!(!context.advice_ready());
}

#[test]
fn test_init_hooks_can_be_disabled() {
    let mut config = AppConfig::default();
    config.container.run_init_hooks = false;

    let (_context, journal) = context_with(config, stock_audit_factory);

    assert!(journal.lines().is_empty());
}

#[test]
fn test_eager_aspects_build_advice_during_bootstrap() {
    let mut config = AppConfig::default();
    config.container.eager_aspects = true;

    let (context, _) = context_with(config, stock_audit_factory);

    assert!(context.advice_ready());
    assert!(context.advice().unwrap().contains("stockAudit.reserved"));
}

#[test]
fn test_dispatch_through_context() {
    let (context, journal) = context_with(AppConfig::default(), stock_audit_factory);

    let target = |args: &[Value]| -> Result<Value> { Ok(json!({ "reserved": args[0] })) };
    let result = context
        .dispatch(
            &JoinPoint::new("Reservations", "reserve", vec![json!("sku-1")]),
            &target,
        )
        .unwrap();

    assert_eq!(result, json!({ "reserved": "sku-1" }));
    assert_eq!(
        journal.lines(),
        vec![
            "inventory loaded".to_string(),
            r#"Reservations::reserve returned {"reserved":"sku-1"}"#.to_string(),
        ]
    );
    assert!(context.advice_ready());
}

static CONCURRENT_BUILDS: AtomicUsize = AtomicUsize::new(0);

fn counting_audit_factory(components: &dyn ComponentLookup) -> Result<Arc<dyn Component>> {
    CONCURRENT_BUILDS.fetch_add(1, Ordering::SeqCst);
    stock_audit_factory(components)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access_builds_advice_once() {
    let (context, _) = context_with(AppConfig::default(), counting_audit_factory);
    let context = Arc::new(context);

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let context = Arc::clone(&context);
            tokio::task::spawn_blocking(move || context.advice().map(|a| a.len()))
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), 1);
    }

    assert_eq!(CONCURRENT_BUILDS.load(Ordering::SeqCst), 1);
    let first = context.advice().unwrap();
    let second = context.advice().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

static FLAKY_ATTEMPTS: AtomicUsize = AtomicUsize::new(0);

fn flaky_audit_factory(components: &dyn ComponentLookup) -> Result<Arc<dyn Component>> {
    if FLAKY_ATTEMPTS.fetch_add(1, Ordering::SeqCst) == 0 {
        return Err(Error::invocation("audit backend not ready"));
    }
    stock_audit_factory(components)
}

#[test]
fn test_failed_advice_build_is_not_memoized() {
    let (context, _) = context_with(AppConfig::default(), flaky_audit_factory);

    let err = context.advice().unwrap_err();
    assert!(matches!(&err, Error::Construction { type_name, .. } if type_name == "StockAudit"));
    assert!(!context.advice_ready());

    assert!(context.advice().is_ok());
    assert_eq!(FLAKY_ATTEMPTS.load(Ordering::SeqCst), 2);
}

#[test]
fn test_shutdown_runs_close_hooks_once() {
    let (context, journal) = context_with(AppConfig::default(), stock_audit_factory);

    assert_eq!(context.shutdown().unwrap(), 1);
    assert_eq!(context.shutdown().unwrap(), 0);
    assert!(context.is_shut_down());
    assert_eq!(journal.lines(), vec!["inventory loaded", "inventory flushed"]);
}

#[test]
fn test_duplicate_preregistered_component_fails_build() {
    let err = RuntimeContext::builder(AppConfig::default())
        .with_metadata_source(Arc::new(InMemoryMetadataSource::new()))
        .with_component("journal", Arc::new(Journal::default()))
        .with_component("journal", Arc::new(Journal::default()))
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateComponent { .. }));
}

#[test]
fn test_missing_dependency_fails_build() {
    let err = RuntimeContext::builder(AppConfig::default())
        .with_metadata_source(metadata(stock_audit_factory))
        .build()
        .unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("journal"));
}

#[test]
fn test_default_metadata_source_sees_no_declarations() {
    let context = RuntimeContext::builder(AppConfig::default()).build().unwrap();

    assert!(context.components().is_empty());
    assert!(context.advice().unwrap().is_empty());
}
