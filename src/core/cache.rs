//! Name → handle cache with compute-if-absent publication

use super::capability::LogHandle;
use super::error::Result;
use super::metrics::FacadeMetrics;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-factory cache of resolved handles
///
/// Hits take a read lock and clone an `Arc`. Misses run the supplied resolver
/// with no lock held, then publish with insert-if-absent so racing threads all
/// end up with the first published handle. Failures are never stored.
pub struct LoggerCache {
    handles: RwLock<HashMap<String, LogHandle>>,
    metrics: Arc<FacadeMetrics>,
}

impl LoggerCache {
    pub fn new(metrics: Arc<FacadeMetrics>) -> Self {
        Self {
            handles: RwLock::new(HashMap::new()),
            metrics,
        }
    }

    /// Cached handle for `name`, if one has been published
    #[inline]
    pub fn get(&self, name: &str) -> Option<LogHandle> {
        self.handles.read().get(name).cloned()
    }

    /// Cached handle for `name`, or the result of `resolve` once published
    ///
    /// `resolve` runs without any lock held, so it may look up other names.
    /// When two threads race on the same name both may resolve, but both
    /// return whichever handle was published first. An error is returned
    /// as-is and nothing is stored, so the next call tries again.
    pub fn get_or_create<F>(&self, name: &str, resolve: F) -> Result<LogHandle>
    where
        F: FnOnce(&str) -> Result<LogHandle>,
    {
        if let Some(handle) = self.get(name) {
            self.metrics.record_logger_hit();
            return Ok(handle);
        }

        self.metrics.record_logger_miss();
        let created = resolve(name)?;

        let mut handles = self.handles.write();
        let published = handles.entry(name.to_owned()).or_insert(created);
        Ok(Arc::clone(published))
    }

    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handles.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn clear(&self) {
        self.handles.write().clear();
    }
}

impl std::fmt::Debug for LoggerCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerCache")
            .field("names", &self.names())
            .finish()
    }
}
