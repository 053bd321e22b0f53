//! Factories: one backend family per scope
//!
//! A factory hands out named loggers. The built-in [`DefaultLogFactory`]
//! pairs a [`LoggerCache`] with an [`AdapterResolver`]; other implementations
//! can be registered in a [`FactoryTable`] and selected by configuration.

use super::backend::{BackendTable, CandidateList};
use super::cache::LoggerCache;
use super::capability::LogHandle;
use super::config::FacadeConfig;
use super::diagnostics::Diagnostics;
use super::error::Result;
use super::metrics::FacadeMetrics;
use super::resolver::AdapterResolver;
use super::scope::Scope;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Identifier of [`DefaultLogFactory`] in the factory table
pub const DEFAULT_FACTORY: &str = "default";

pub trait LogFactory: Send + Sync {
    /// Logger for `name`, created on first request and cached afterwards
    fn get_log(&self, name: &str) -> Result<LogHandle>;

    /// Identifier this factory was registered under
    fn id(&self) -> &str;

    /// Scope this factory serves
    fn scope(&self) -> &Scope;
}

impl dyn LogFactory {
    /// Logger named after a type, e.g. `my_crate::db::Pool`
    pub fn get_log_for<T: ?Sized>(&self) -> Result<LogHandle> {
        self.get_log(std::any::type_name::<T>())
    }
}

impl fmt::Debug for dyn LogFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFactory")
            .field("id", &self.id())
            .field("scope", self.scope())
            .finish()
    }
}

/// Everything a factory constructor may draw on
pub struct FactoryContext<'a> {
    pub scope: &'a Scope,
    pub config: &'a FacadeConfig,
    pub backends: &'a Arc<BackendTable>,
    pub candidates: &'a CandidateList,
    pub diagnostics: &'a Diagnostics,
    pub metrics: &'a Arc<FacadeMetrics>,
}

pub type FactoryConstructor =
    Arc<dyn Fn(&FactoryContext<'_>) -> Result<Arc<dyn LogFactory>> + Send + Sync>;

/// Identifier → factory constructor registrations
#[derive(Clone)]
pub struct FactoryTable {
    constructors: HashMap<String, FactoryConstructor>,
}

impl FactoryTable {
    /// Table with only [`DEFAULT_FACTORY`] registered
    pub fn new() -> Self {
        let mut table = Self {
            constructors: HashMap::new(),
        };
        table.register(DEFAULT_FACTORY, |ctx| {
            Ok(Arc::new(DefaultLogFactory::from_context(ctx)) as Arc<dyn LogFactory>)
        });
        table
    }

    pub fn register<F>(&mut self, id: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&FactoryContext<'_>) -> Result<Arc<dyn LogFactory>> + Send + Sync + 'static,
    {
        self.constructors.insert(id.into(), Arc::new(constructor));
        self
    }

    pub fn get(&self, id: &str) -> Option<&FactoryConstructor> {
        self.constructors.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }
}

impl Default for FactoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FactoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.constructors.keys().collect();
        ids.sort_unstable();
        f.debug_struct("FactoryTable").field("factories", &ids).finish()
    }
}

/// Cascade-discovery factory
#[derive(Debug)]
pub struct DefaultLogFactory {
    scope: Scope,
    cache: LoggerCache,
    resolver: AdapterResolver,
}

impl DefaultLogFactory {
    pub fn new(scope: Scope, cache: LoggerCache, resolver: AdapterResolver) -> Self {
        Self {
            scope,
            cache,
            resolver,
        }
    }

    pub fn from_context(ctx: &FactoryContext<'_>) -> Self {
        let resolver = AdapterResolver::new(
            Arc::clone(ctx.backends),
            ctx.candidates.clone(),
            ctx.config.backend.clone(),
            ctx.diagnostics.clone(),
            Arc::clone(ctx.metrics),
        );
        Self::new(
            ctx.scope.clone(),
            LoggerCache::new(Arc::clone(ctx.metrics)),
            resolver,
        )
    }

    pub fn cache(&self) -> &LoggerCache {
        &self.cache
    }

    pub fn resolver(&self) -> &AdapterResolver {
        &self.resolver
    }
}

impl LogFactory for DefaultLogFactory {
    fn get_log(&self, name: &str) -> Result<LogHandle> {
        self.cache
            .get_or_create(name, |name| self.resolver.resolve(name))
    }

    fn id(&self) -> &str {
        DEFAULT_FACTORY
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }
}
