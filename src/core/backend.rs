//! Statically registered backend table and the candidate list
//!
//! Backends register a constructor under a stable identifier. Discovery walks
//! identifiers from a [`CandidateList`] and asks the table to build a handle;
//! an identifier with no registration is simply a rejected candidate.
//!
//! ```
//! use rust_log_facade::adapters::ConsoleLog;
//! use rust_log_facade::core::{BackendTable, LogHandle, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let mut table = BackendTable::new();
//! table.register_fn("memory", move |name| {
//!     Ok(Arc::new(ConsoleLog::new(name, sink.clone())) as LogHandle)
//! });
//! assert!(table.contains("memory"));
//! ```

use super::capability::LogHandle;
use super::config::FacadeConfig;
use super::diagnostics::Diagnostics;
use super::error::Result;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Identifier of the `tracing` bridge
pub const TRACING_BACKEND: &str = "tracing";
/// Identifier of the `log` crate bridge
pub const LOG_BACKEND: &str = "log";
/// Identifier of the console fallback
pub const CONSOLE_BACKEND: &str = "console";

/// Built-in priority order, richest first, console last
pub const DEFAULT_CANDIDATES: [&str; 3] = [TRACING_BACKEND, LOG_BACKEND, CONSOLE_BACKEND];

/// Constructor for one backend family
pub trait LogBackend: Send + Sync {
    /// Build a handle for `name`, or explain why this backend cannot serve it
    fn create(&self, name: &str) -> Result<LogHandle>;
}

/// Adapts a closure into a [`LogBackend`]
pub struct FnBackend<F>(F);

impl<F> FnBackend<F>
where
    F: Fn(&str) -> Result<LogHandle> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> LogBackend for FnBackend<F>
where
    F: Fn(&str) -> Result<LogHandle> + Send + Sync,
{
    fn create(&self, name: &str) -> Result<LogHandle> {
        (self.0)(name)
    }
}

/// Identifier → constructor registrations
#[derive(Clone, Default)]
pub struct BackendTable {
    backends: HashMap<String, Arc<dyn LogBackend>>,
}

impl BackendTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding every adapter compiled into this build
    pub fn with_defaults(config: &FacadeConfig, diagnostics: &Diagnostics) -> Self {
        let mut table = Self::new();
        crate::adapters::register_defaults(&mut table, config, diagnostics);
        table
    }

    /// Register (or replace) the backend under `id`
    pub fn register(&mut self, id: impl Into<String>, backend: Arc<dyn LogBackend>) -> &mut Self {
        self.backends.insert(id.into(), backend);
        self
    }

    pub fn register_fn<F>(&mut self, id: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&str) -> Result<LogHandle> + Send + Sync + 'static,
    {
        self.register(id, Arc::new(FnBackend::new(f)))
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn LogBackend>> {
        self.backends.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.backends.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl fmt::Debug for BackendTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.ids().collect();
        ids.sort_unstable();
        f.debug_struct("BackendTable").field("backends", &ids).finish()
    }
}

/// Ordered, immutable sequence of backend identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList(Arc<[String]>);

impl CandidateList {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATES)
    }
}
