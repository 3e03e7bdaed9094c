//! Runtime Context - the composition root
//!
//! Owns the component registry, the advice registry and the dispatcher for
//! one container. There are no process-wide singletons: every context
//! bootstraps its own registries from its own metadata source.
//!
//! ```text
//! AppConfig ──► MetadataSource ──► ComponentPlan ──► ComponentRegistry
//!                     │                                   │  init hooks
//!                     │                                   ▼
//!                     └──────► AdviceRegistry (lazy) ──► JoinPointDispatcher
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = RuntimeContext::builder(AppConfig::default())
//!     .with_component("clock", Arc::new(SystemClock))
//!     .build()?;
//!
//! let orders = context.components().get_as::<OrderService>("orderService")?;
//! let point = JoinPoint::new("OrderService", "place", args).in_module("shop::orders");
//! let result = context.dispatch(&point, &target)?;
//!
//! context.shutdown()?;
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lucky_application::registry::{AdviceRegistry, ComponentRegistry};
use lucky_application::{
    ComponentPlan, FactoryConstructor, HandlerInvoker, JoinPointDispatcher, LinkedMetadataSource,
    build_advice_registry, run_close_hooks, run_init_hooks,
};
use lucky_domain::error::Result;
use lucky_domain::ports::{Component, Constructor, Invoker, MetadataSource};
use lucky_domain::value_objects::{JoinPoint, TargetFn, Value};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::config::AppConfig;

/// One bootstrapped container
pub struct RuntimeContext {
    config: Arc<AppConfig>,
    metadata: Arc<dyn MetadataSource>,
    constructor: Arc<dyn Constructor>,
    invoker: Arc<dyn Invoker>,
    components: Arc<ComponentRegistry>,
    plan: ComponentPlan,
    advice: OnceCell<Arc<AdviceRegistry>>,
    dispatcher: OnceCell<Arc<JoinPointDispatcher>>,
    shut_down: AtomicBool,
}

impl RuntimeContext {
    /// Start configuring a context
    pub fn builder(config: AppConfig) -> RuntimeContextBuilder {
        RuntimeContextBuilder::new(config)
    }

    /// Application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Metadata source the context was bootstrapped from
    pub fn metadata(&self) -> &dyn MetadataSource {
        self.metadata.as_ref()
    }

    /// Component registry
    pub fn components(&self) -> &Arc<ComponentRegistry> {
        &self.components
    }

    /// Component construction order
    pub fn plan(&self) -> &ComponentPlan {
        &self.plan
    }

    /// Advice registry, built on first access
    ///
    /// Concurrent first calls build it once; a failed build is not kept and
    /// the next call retries.
    pub fn advice(&self) -> Result<Arc<AdviceRegistry>> {
        self.advice
            .get_or_try_init(|| {
                build_advice_registry(
                    self.metadata.as_ref(),
                    self.constructor.as_ref(),
                    &self.components,
                )
                .map(Arc::new)
            })
            .cloned()
    }

    /// Whether the advice registry has been built
    pub fn advice_ready(&self) -> bool {
        self.advice.get().is_some()
    }

    /// Join-point dispatcher, built on first access
    pub fn dispatcher(&self) -> Result<Arc<JoinPointDispatcher>> {
        self.dispatcher
            .get_or_try_init(|| {
                let advice = self.advice()?;
                Ok(Arc::new(JoinPointDispatcher::new(
                    advice,
                    Arc::clone(&self.invoker),
                    self.metadata.as_ref(),
                )))
            })
            .cloned()
    }

    /// Dispatch an intercepted call through its declared join points
    pub fn dispatch(&self, point: &JoinPoint, target: &TargetFn<'_>) -> Result<Value> {
        self.dispatcher()?.dispatch(point, target)
    }

    /// Run close hooks in reverse registration order
    ///
    /// Only the first call runs them; later calls return `Ok(0)`.
    pub fn shutdown(&self) -> Result<usize> {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            debug!("Runtime context already shut down");
            return Ok(0);
        }
        info!("Shutting down runtime context");
        run_close_hooks(
            self.metadata.as_ref(),
            &self.plan,
            &self.components,
            self.invoker.as_ref(),
        )
    }

    /// Whether `shutdown` has been called
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("components", &self.components)
            .field("advice_ready", &self.advice_ready())
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}

/// Builder for [`RuntimeContext`]
///
/// Defaults: [`LinkedMetadataSource`] over the configured scan roots,
/// [`FactoryConstructor`] and [`HandlerInvoker`].
pub struct RuntimeContextBuilder {
    config: AppConfig,
    metadata: Option<Arc<dyn MetadataSource>>,
    constructor: Arc<dyn Constructor>,
    invoker: Arc<dyn Invoker>,
    preregistered: Vec<(String, Arc<dyn Component>)>,
}

impl RuntimeContextBuilder {
    /// Builder with default capabilities
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            metadata: None,
            constructor: Arc::new(FactoryConstructor),
            invoker: Arc::new(HandlerInvoker),
            preregistered: Vec::new(),
        }
    }

    /// Use a custom metadata source instead of the linked declarations
    pub fn with_metadata_source(mut self, metadata: Arc<dyn MetadataSource>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Use a custom constructor
    pub fn with_constructor(mut self, constructor: Arc<dyn Constructor>) -> Self {
        self.constructor = constructor;
        self
    }

    /// Use a custom invoker
    pub fn with_invoker(mut self, invoker: Arc<dyn Invoker>) -> Self {
        self.invoker = invoker;
        self
    }

    /// Register an instance before bootstrap, so declared types can depend on it
    pub fn with_component(mut self, id: impl Into<String>, instance: Arc<dyn Component>) -> Self {
        self.preregistered.push((id.into(), instance));
        self
    }

    /// Bootstrap components, run init hooks, and build the advice registry
    /// when `container.eager_aspects` is set
    pub fn build(self) -> Result<RuntimeContext> {
        let metadata: Arc<dyn MetadataSource> = match self.metadata {
            Some(metadata) => metadata,
            None => Arc::new(LinkedMetadataSource::with_roots(
                self.config.scan.roots.iter().cloned(),
            )),
        };

        let components = Arc::new(ComponentRegistry::new());
        for (id, instance) in self.preregistered {
            components.register(id, instance)?;
        }

        let plan = ComponentPlan::from_metadata(metadata.as_ref(), &*components)?;
        plan.register_all(self.constructor.as_ref(), &components)?;

        if self.config.container.run_init_hooks {
            run_init_hooks(
                metadata.as_ref(),
                &plan,
                &components,
                self.invoker.as_ref(),
            )?;
        }

        let context = RuntimeContext {
            config: Arc::new(self.config),
            metadata,
            constructor: self.constructor,
            invoker: self.invoker,
            components,
            plan,
            advice: OnceCell::new(),
            dispatcher: OnceCell::new(),
            shut_down: AtomicBool::new(false),
        };

        if context.config.container.eager_aspects {
            context.advice()?;
        }

        info!(
            components = context.components.len(),
            advice_ready = context.advice_ready(),
            "Runtime context ready"
        );
        Ok(context)
    }
}

/// Bootstrap a context with default capabilities
pub fn init_runtime(config: AppConfig) -> Result<RuntimeContext> {
    RuntimeContext::builder(config).build()
}
