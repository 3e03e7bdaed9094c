//! Shared fixtures for lucky-application tests
//!
//! Every fixture aspect records what it sees into an [`EventLog`] component,
//! which tests register by hand before bootstrap so factories can resolve it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lucky_application::registry::ComponentRegistry;
use lucky_domain::error::{Error, Result};
use lucky_domain::ports::{
    AroundAdvice, Component, ComponentLookup, Marker, MarkerCategory, OperationDescriptor,
    TypeDescriptor,
};
use lucky_domain::value_objects::{JoinPoint, Outcome, ProceedingJoinPoint, Value};

/// Component id of the shared event log
pub const EVENT_LOG: &str = "eventLog";

/// Ordered record of everything advice and targets did
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Component for EventLog {}

/// Registry pre-loaded with an [`EventLog`]
pub fn registry_with_log() -> (ComponentRegistry, Arc<EventLog>) {
    let registry = ComponentRegistry::new();
    let log = Arc::new(EventLog::default());
    registry.register(EVENT_LOG, log.clone()).unwrap();
    (registry, log)
}

fn event_log(components: &dyn ComponentLookup) -> Result<Arc<EventLog>> {
    components.lookup_as::<EventLog>(EVENT_LOG)
}

fn downcast<T: Component>(instance: &dyn Component) -> Result<&T> {
    instance
        .downcast_ref::<T>()
        .ok_or_else(|| Error::internal("unexpected aspect instance"))
}

fn describe(outcome: Option<&Outcome>) -> String {
    match outcome {
        Some(Outcome::Returned(value)) => format!("returned {value}"),
        Some(Outcome::Failed { message }) => format!("failed {message}"),
        None => "pending".to_string(),
    }
}

// ============================================================================
// OrderAudit: after-advice, no explicit names
// ============================================================================

pub struct OrderAudit {
    log: Arc<EventLog>,
}

impl Component for OrderAudit {}

fn order_audit_factory(components: &dyn ComponentLookup) -> Result<Arc<dyn Component>> {
    Ok(Arc::new(OrderAudit {
        log: event_log(components)?,
    }))
}

fn order_audit_log_result(instance: &dyn Component, point: &JoinPoint) -> Result<Value> {
    let audit = downcast::<OrderAudit>(instance)?;
    audit.log.push(format!(
        "after:{}:{}",
        point.signature(),
        describe(point.outcome())
    ));
    Ok(Value::Null)
}

/// `OrderAudit` with one `After` operation `logResult`
pub fn order_audit() -> TypeDescriptor {
    TypeDescriptor::new("OrderAudit")
        .with_marker(Marker::new(MarkerCategory::Aspect))
        .with_operation(
            OperationDescriptor::new("logResult")
                .with_marker(Marker::new(MarkerCategory::After))
                .with_handler(order_audit_log_result),
        )
        .with_factory(order_audit_factory)
}

// ============================================================================
// Tracer: before + after, explicit names
// ============================================================================

pub struct Tracer {
    log: Arc<EventLog>,
}

impl Component for Tracer {}

fn tracer_factory(components: &dyn ComponentLookup) -> Result<Arc<dyn Component>> {
    Ok(Arc::new(Tracer {
        log: event_log(components)?,
    }))
}

fn tracer_enter(instance: &dyn Component, point: &JoinPoint) -> Result<Value> {
    downcast::<Tracer>(instance)?
        .log
        .push(format!("before:{}", point.signature()));
    Ok(Value::from("ignored"))
}

fn tracer_exit(instance: &dyn Component, point: &JoinPoint) -> Result<Value> {
    downcast::<Tracer>(instance)?
        .log
        .push(format!("exit:{}", describe(point.outcome())));
    Ok(Value::Null)
}

/// Aspect `trace` with `trace.enter` (before) and `trace.exit` (after)
pub fn tracer() -> TypeDescriptor {
    TypeDescriptor::new("Tracer")
        .with_marker(Marker::with_value(MarkerCategory::Aspect, "trace"))
        .with_operation(
            OperationDescriptor::new("on_enter")
                .with_marker(Marker::with_value(MarkerCategory::Before, "enter"))
                .with_handler(tracer_enter),
        )
        .with_operation(OperationDescriptor::new("helper"))
        .with_operation(
            OperationDescriptor::new("on_exit")
                .with_marker(Marker::with_value(MarkerCategory::After, "exit"))
                .with_handler(tracer_exit),
        )
        .with_factory(tracer_factory)
}

// ============================================================================
// Guard: before-advice that can refuse a call
// ============================================================================

pub struct Guard {
    log: Arc<EventLog>,
}

impl Component for Guard {}

fn guard_factory(components: &dyn ComponentLookup) -> Result<Arc<dyn Component>> {
    Ok(Arc::new(Guard {
        log: event_log(components)?,
    }))
}

fn guard_check(instance: &dyn Component, point: &JoinPoint) -> Result<Value> {
    let guard = downcast::<Guard>(instance)?;
    if point.arg(0).and_then(Value::as_str) == Some("deny") {
        guard.log.push("guard:denied");
        return Err(Error::invocation("access denied"));
    }
    guard.log.push("guard:allowed");
    Ok(Value::Null)
}

fn guard_after(instance: &dyn Component, _point: &JoinPoint) -> Result<Value> {
    downcast::<Guard>(instance)?.log.push("guard:after");
    Ok(Value::Null)
}

/// Aspect `guard` with `guard.check` (before) and `guard.release` (after)
pub fn guard() -> TypeDescriptor {
    TypeDescriptor::new("Guard")
        .with_marker(Marker::new(MarkerCategory::Aspect))
        .with_operation(
            OperationDescriptor::new("check")
                .with_marker(Marker::new(MarkerCategory::Before))
                .with_handler(guard_check),
        )
        .with_operation(
            OperationDescriptor::new("release")
                .with_marker(Marker::new(MarkerCategory::After))
                .with_handler(guard_after),
        )
        .with_factory(guard_factory)
}

// ============================================================================
// Failing after-advice
// ============================================================================

pub struct Flaky;

impl Component for Flaky {}

fn flaky_after(_instance: &dyn Component, _point: &JoinPoint) -> Result<Value> {
    Err(Error::invocation("after advice broke"))
}

/// Aspect `flaky` whose `flaky.fail` after-advice always fails
pub fn flaky() -> TypeDescriptor {
    TypeDescriptor::new("Flaky")
        .with_marker(Marker::new(MarkerCategory::Aspect))
        .with_operation(
            OperationDescriptor::new("fail")
                .with_marker(Marker::new(MarkerCategory::After))
                .with_handler(flaky_after),
        )
        .with_factory(|_| Ok(Arc::new(Flaky)))
}

// ============================================================================
// ResultCache: short-circuiting around-advice
// ============================================================================

pub struct ResultCache {
    log: Arc<EventLog>,
    entries: Mutex<HashMap<String, Value>>,
}

impl Component for ResultCache {
    fn into_around(self: Arc<Self>) -> Option<Arc<dyn AroundAdvice>> {
        Some(self)
    }
}

impl AroundAdvice for ResultCache {
    fn around(&self, point: &ProceedingJoinPoint<'_>) -> Result<Value> {
        let key = point.args().first().map(Value::to_string).unwrap_or_default();
        if let Some(hit) = self.entries.lock().unwrap().get(&key).cloned() {
            self.log.push(format!("cache:hit:{key}"));
            return Ok(hit);
        }
        self.log.push(format!("cache:miss:{key}"));
        let value = point.proceed()?;
        self.entries.lock().unwrap().insert(key, value.clone());
        Ok(value)
    }
}

fn result_cache_factory(components: &dyn ComponentLookup) -> Result<Arc<dyn Component>> {
    Ok(Arc::new(ResultCache {
        log: event_log(components)?,
        entries: Mutex::new(HashMap::new()),
    }))
}

/// Around aspect `cache`, declared by name
pub fn result_cache() -> TypeDescriptor {
    TypeDescriptor::new("ResultCache")
        .with_marker(Marker::with_value(MarkerCategory::Aspect, "cache"))
        .around()
        .with_factory(result_cache_factory)
}

/// A second type whose canonical name also resolves to `cache`
pub fn competing_cache() -> TypeDescriptor {
    TypeDescriptor::new("Cache")
        .with_marker(Marker::new(MarkerCategory::Aspect))
        .around()
        .with_factory(result_cache_factory)
}

// ============================================================================
// Retry: around-advice that proceeds repeatedly
// ============================================================================

pub struct Retry {
    attempts: usize,
}

impl Component for Retry {
    fn into_around(self: Arc<Self>) -> Option<Arc<dyn AroundAdvice>> {
        Some(self)
    }
}

impl AroundAdvice for Retry {
    fn around(&self, point: &ProceedingJoinPoint<'_>) -> Result<Value> {
        let mut last = Err(Error::invocation("no attempt made"));
        for _ in 0..self.attempts {
            last = point.proceed();
            if last.is_ok() {
                break;
            }
        }
        last
    }
}

/// Around aspect `retry`, three attempts
pub fn retry() -> TypeDescriptor {
    TypeDescriptor::new("Retry")
        .with_marker(Marker::new(MarkerCategory::Aspect))
        .around()
        .with_factory(|_| Ok(Arc::new(Retry { attempts: 3 })))
}

// ============================================================================
// Doubler: around-advice that rewrites arguments
// ============================================================================

pub struct Doubler;

impl Component for Doubler {
    fn into_around(self: Arc<Self>) -> Option<Arc<dyn AroundAdvice>> {
        Some(self)
    }
}

impl AroundAdvice for Doubler {
    fn around(&self, point: &ProceedingJoinPoint<'_>) -> Result<Value> {
        let doubled: Vec<Value> = point
            .args()
            .iter()
            .map(|v| Value::from(v.as_i64().unwrap_or_default() * 2))
            .collect();
        point.proceed_with(&doubled)
    }
}

/// Around aspect `doubler`
pub fn doubler() -> TypeDescriptor {
    TypeDescriptor::new("Doubler")
        .with_marker(Marker::new(MarkerCategory::Aspect))
        .around()
        .with_factory(|_| Ok(Arc::new(Doubler)))
}

// ============================================================================
// Malformed: around shape without around advice
// ============================================================================

pub struct NotReallyAround;

impl Component for NotReallyAround {}

/// Declared around, but the instance does not expose `AroundAdvice`
pub fn malformed_around() -> TypeDescriptor {
    TypeDescriptor::new("Timing")
        .with_marker(Marker::new(MarkerCategory::Aspect))
        .around()
        .with_factory(|_| Ok(Arc::new(NotReallyAround)))
}

// ============================================================================
// Plain components for bootstrap tests
// ============================================================================

pub struct Repository {
    pub log: Arc<EventLog>,
}

impl Component for Repository {}

fn repository_open(instance: &dyn Component, _point: &JoinPoint) -> Result<Value> {
    downcast::<Repository>(instance)?.log.push("init:repository");
    Ok(Value::Null)
}

fn repository_close(instance: &dyn Component, _point: &JoinPoint) -> Result<Value> {
    downcast::<Repository>(instance)?.log.push("close:repository");
    Ok(Value::Null)
}

/// Component `orderRepository` with init and close hooks
pub fn repository() -> TypeDescriptor {
    TypeDescriptor::new("OrderRepository")
        .with_marker(Marker::new(MarkerCategory::Component))
        .with_operation(
            OperationDescriptor::new("open")
                .with_marker(Marker::new(MarkerCategory::InitRun))
                .with_handler(repository_open),
        )
        .with_operation(
            OperationDescriptor::new("close")
                .with_marker(Marker::new(MarkerCategory::CloseRun))
                .with_handler(repository_close),
        )
        .with_factory(|components| {
            Ok(Arc::new(Repository {
                log: event_log(components)?,
            }))
        })
}

pub struct OrderService {
    pub repository: Arc<Repository>,
    pub log: Arc<EventLog>,
}

impl Component for OrderService {}

fn service_start(instance: &dyn Component, _point: &JoinPoint) -> Result<Value> {
    downcast::<OrderService>(instance)?.log.push("init:service");
    Ok(Value::Null)
}

fn service_stop(instance: &dyn Component, _point: &JoinPoint) -> Result<Value> {
    downcast::<OrderService>(instance)?.log.push("close:service");
    Err(Error::invocation("service refused to stop cleanly"))
}

/// Component `orders` depending on `orderRepository`
///
/// Its close hook fails, to check the remaining hooks still run.
pub fn order_service() -> TypeDescriptor {
    TypeDescriptor::new("OrderService")
        .with_marker(Marker::with_value(MarkerCategory::Component, "orders"))
        .depends_on("orderRepository")
        .with_operation(
            OperationDescriptor::new("place")
                .with_join_point("orderAudit.logResult"),
        )
        .with_operation(
            OperationDescriptor::new("start")
                .with_marker(Marker::new(MarkerCategory::InitRun))
                .with_handler(service_start),
        )
        .with_operation(
            OperationDescriptor::new("stop")
                .with_marker(Marker::new(MarkerCategory::CloseRun))
                .with_handler(service_stop),
        )
        .with_factory(|components| {
            Ok(Arc::new(OrderService {
                repository: components.lookup_as::<Repository>("orderRepository")?,
                log: event_log(components)?,
            }))
        })
}

/// Plain component with no factory
pub fn unbuildable() -> TypeDescriptor {
    TypeDescriptor::new("Unbuildable").with_marker(Marker::new(MarkerCategory::Component))
}
