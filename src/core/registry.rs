//! Scope → factory registry
//!
//! The registry is an ordinary value: tests and hosts build their own with
//! [`FactoryRegistry::builder`]. A single process-wide instance is also
//! available through [`global`]; it is built from [`FacadeConfig::load`] on
//! first use and can be dropped with [`reset_global`].
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let registry = FactoryRegistry::builder()
//!     .console_sink(sink.clone())
//!     .candidates(["console"])
//!     .diagnostics(Diagnostics::silent())
//!     .build();
//!
//! let log = registry.get_log(&Scope::named("plugin-a"), "startup").unwrap();
//! log.info_args("loaded {} handlers", &[&3]).unwrap();
//! assert!(sink.lines()[0].ends_with("[INFO] startup - loaded 3 handlers"));
//! ```

use super::backend::{BackendTable, CandidateList, LogBackend};
use super::capability::LogHandle;
use super::config::FacadeConfig;
use super::diagnostics::Diagnostics;
use super::error::{FacadeError, Result};
use super::factory::{FactoryContext, FactoryTable, LogFactory, DEFAULT_FACTORY};
use super::metrics::FacadeMetrics;
use super::scope::Scope;
use super::sink::Sink;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub struct FactoryRegistry {
    factories: RwLock<HashMap<Scope, Arc<dyn LogFactory>>>,
    factory_table: FactoryTable,
    backends: Arc<BackendTable>,
    candidates: CandidateList,
    config: FacadeConfig,
    diagnostics: Diagnostics,
    metrics: Arc<FacadeMetrics>,
}

impl FactoryRegistry {
    /// Registry with every built-in backend and the given configuration
    pub fn new(config: FacadeConfig) -> Self {
        Self::builder().config(config).build()
    }

    #[must_use]
    pub fn builder() -> FactoryRegistryBuilder {
        FactoryRegistryBuilder::new()
    }

    /// The factory for `scope`, constructing and publishing it on first use
    pub fn get_factory(&self, scope: &Scope) -> Result<Arc<dyn LogFactory>> {
        if let Some(factory) = self.factories.read().get(scope) {
            self.metrics.record_factory_hit();
            return Ok(Arc::clone(factory));
        }

        let created = self.create_factory(scope)?;

        let mut factories = self.factories.write();
        match factories.entry(scope.clone()) {
            Entry::Occupied(published) => {
                self.metrics.record_factory_discarded();
                Ok(Arc::clone(published.get()))
            }
            Entry::Vacant(slot) => {
                self.metrics.record_factory_created();
                Ok(Arc::clone(slot.insert(created)))
            }
        }
    }

    /// Shorthand for `get_factory(scope)?.get_log(name)`
    pub fn get_log(&self, scope: &Scope, name: &str) -> Result<LogHandle> {
        self.get_factory(scope)?.get_log(name)
    }

    /// Logger named after a type within `scope`
    pub fn get_log_for<T: ?Sized>(&self, scope: &Scope) -> Result<LogHandle> {
        self.get_factory(scope)?.get_log_for::<T>()
    }

    fn create_factory(&self, scope: &Scope) -> Result<Arc<dyn LogFactory>> {
        let id = self.config.factory.as_deref().unwrap_or(DEFAULT_FACTORY);

        let Some(constructor) = self.factory_table.get(id) else {
            let err = FacadeError::initialization(
                format!("factory '{}'", id),
                "no factory registered under this identifier",
            );
            self.diagnostics.error("registry", &err);
            return Err(err);
        };

        let ctx = FactoryContext {
            scope,
            config: &self.config,
            backends: &self.backends,
            candidates: &self.candidates,
            diagnostics: &self.diagnostics,
            metrics: &self.metrics,
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| constructor(&ctx)));
        let err = match outcome {
            Ok(Ok(factory)) => return Ok(factory),
            Ok(Err(FacadeError::Initialization { component, message })) => {
                FacadeError::Initialization { component, message }
            }
            Ok(Err(other)) => {
                FacadeError::initialization(format!("factory '{}'", id), other.to_string())
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                FacadeError::initialization(
                    format!("factory '{}'", id),
                    format!("constructor panicked: {}", panic_msg),
                )
            }
        };

        self.diagnostics.error(
            "registry",
            format_args!("could not create factory for scope {}: {}", scope, err),
        );
        Err(err)
    }

    /// Drop every cached factory (and with them, every cached logger)
    pub fn reset(&self) {
        self.factories.write().clear();
    }

    pub fn contains(&self, scope: &Scope) -> bool {
        self.factories.read().contains_key(scope)
    }

    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }

    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }

    pub fn backends(&self) -> &BackendTable {
        &self.backends
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn metrics(&self) -> &FacadeMetrics {
        &self.metrics
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::new(FacadeConfig::default())
    }
}

impl std::fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("scopes", &self.len())
            .field("factory_table", &self.factory_table)
            .field("backends", &self.backends)
            .field("candidates", &self.candidates)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for constructing a [`FactoryRegistry`] with a fluent API
///
/// Built-in backends are registered from the final configuration unless
/// [`FactoryRegistryBuilder::without_default_backends`] is called; backends
/// added with [`FactoryRegistryBuilder::backend`] replace built-ins with the
/// same identifier.
pub struct FactoryRegistryBuilder {
    config: FacadeConfig,
    diagnostics: Diagnostics,
    candidates: CandidateList,
    factory_table: FactoryTable,
    extra_backends: Vec<(String, Arc<dyn LogBackend>)>,
    default_backends: bool,
    console_sink: Option<Arc<dyn Sink>>,
}

impl FactoryRegistryBuilder {
    pub fn new() -> Self {
        Self {
            config: FacadeConfig::default(),
            diagnostics: Diagnostics::default(),
            candidates: CandidateList::default(),
            factory_table: FactoryTable::new(),
            extra_backends: Vec::new(),
            default_backends: true,
            console_sink: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: FacadeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Replace the built-in candidate order
    #[must_use = "builder methods return a new value"]
    pub fn candidates<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = CandidateList::new(ids);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn backend(mut self, id: impl Into<String>, backend: Arc<dyn LogBackend>) -> Self {
        self.extra_backends.push((id.into(), backend));
        self
    }

    /// Register a closure backend
    #[must_use = "builder methods return a new value"]
    pub fn backend_fn<F>(self, id: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Result<LogHandle> + Send + Sync + 'static,
    {
        self.backend(id, Arc::new(super::backend::FnBackend::new(f)))
    }

    /// Start from an empty backend table
    #[must_use = "builder methods return a new value"]
    pub fn without_default_backends(mut self) -> Self {
        self.default_backends = false;
        self
    }

    /// Send the built-in console backend's output to `sink` instead of stderr
    #[must_use = "builder methods return a new value"]
    pub fn console_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.console_sink = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn factory<F>(mut self, id: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&FactoryContext<'_>) -> Result<Arc<dyn LogFactory>> + Send + Sync + 'static,
    {
        self.factory_table.register(id, constructor);
        self
    }

    pub fn build(self) -> FactoryRegistry {
        let mut backends = BackendTable::new();
        if self.default_backends {
            crate::adapters::register_defaults_with_sink(
                &mut backends,
                &self.config,
                &self.diagnostics,
                self.console_sink,
            );
        }
        for (id, backend) in self.extra_backends {
            backends.register(id, backend);
        }

        FactoryRegistry {
            factories: RwLock::new(HashMap::new()),
            factory_table: self.factory_table,
            backends: Arc::new(backends),
            candidates: self.candidates,
            config: self.config,
            diagnostics: self.diagnostics,
            metrics: Arc::new(FacadeMetrics::new()),
        }
    }
}

impl Default for FactoryRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: RwLock<Option<Arc<FactoryRegistry>>> = parking_lot::const_rwlock(None);

/// The process-wide registry, built from the environment on first use
pub fn global() -> Arc<FactoryRegistry> {
    if let Some(registry) = GLOBAL.read().as_ref() {
        return Arc::clone(registry);
    }

    let mut slot = GLOBAL.write();
    if let Some(registry) = slot.as_ref() {
        return Arc::clone(registry);
    }
    let diagnostics = Diagnostics::stderr();
    let config = FacadeConfig::load(&diagnostics);
    let registry = Arc::new(
        FactoryRegistry::builder()
            .config(config)
            .diagnostics(diagnostics)
            .build(),
    );
    *slot = Some(Arc::clone(&registry));
    registry
}

/// Install `registry` as the process-wide registry
pub fn install_global(registry: FactoryRegistry) -> Arc<FactoryRegistry> {
    let registry = Arc::new(registry);
    *GLOBAL.write() = Some(Arc::clone(&registry));
    registry
}

/// Forget the process-wide registry; the next [`global`] call rebuilds it
pub fn reset_global() {
    GLOBAL.write().take();
}

/// Logger from the process-wide registry's global scope
pub fn get_log(name: &str) -> Result<LogHandle> {
    global().get_log(&Scope::Global, name)
}

/// Logger from the process-wide registry within `scope`
pub fn get_log_in(scope: &Scope, name: &str) -> Result<LogHandle> {
    global().get_log(scope, name)
}

pub fn get_factory(scope: &Scope) -> Result<Arc<dyn LogFactory>> {
    global().get_factory(scope)
}
