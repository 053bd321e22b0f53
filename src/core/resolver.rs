//! Backend resolution with a remembered fast path
//!
//! `resolve(name)` first tries the construction recipe recorded by the last
//! successful discovery. When there is none, or it fails for this name, the
//! resolver walks the candidate list in order and records the first backend
//! that constructs. Candidate failures are reported on the diagnostics
//! channel and skipped; only exhaustion (or a failing forced backend) reaches
//! the caller.
//!
//! A fast-path failure keeps the recipe and falls through to discovery in the
//! same call. A successful discovery replaces the recipe; an exhausted one
//! leaves it as it was.

use super::backend::{BackendTable, CandidateList, LogBackend};
use super::capability::LogHandle;
use super::diagnostics::Diagnostics;
use super::error::{CandidateRejection, FacadeError, Result};
use super::metrics::FacadeMetrics;
use parking_lot::RwLock;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// How to build a handle: the backend that last succeeded
#[derive(Clone)]
pub struct ConstructionRecipe {
    backend_id: Arc<str>,
    backend: Arc<dyn LogBackend>,
}

impl ConstructionRecipe {
    fn new(backend_id: &str, backend: Arc<dyn LogBackend>) -> Self {
        Self {
            backend_id: Arc::from(backend_id),
            backend,
        }
    }

    pub fn backend_id(&self) -> &str {
        &self.backend_id
    }

    /// Run the constructor, turning errors and panics into a rejection reason
    fn build(&self, name: &str) -> std::result::Result<LogHandle, String> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.backend.create(name)));
        match outcome {
            Ok(Ok(handle)) => Ok(handle),
            Ok(Err(e)) => Err(e.to_string()),
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                Err(format!("constructor panicked: {}", panic_msg))
            }
        }
    }
}

impl std::fmt::Debug for ConstructionRecipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructionRecipe")
            .field("backend_id", &self.backend_id)
            .finish()
    }
}

/// Binds logger names to backend handles for one factory
///
/// Holds the candidate order, an optional forced backend and the recipe of
/// the last successful construction. Shared by every thread that resolves
/// through the owning factory.
pub struct AdapterResolver {
    backends: Arc<BackendTable>,
    candidates: CandidateList,
    forced: Option<String>,
    recipe: RwLock<Option<ConstructionRecipe>>,
    diagnostics: Diagnostics,
    metrics: Arc<FacadeMetrics>,
}

impl AdapterResolver {
    /// Create a resolver with no remembered recipe
    ///
    /// When `forced` is set, discovery tries only that identifier and
    /// ignores `candidates`.
    pub fn new(
        backends: Arc<BackendTable>,
        candidates: CandidateList,
        forced: Option<String>,
        diagnostics: Diagnostics,
        metrics: Arc<FacadeMetrics>,
    ) -> Self {
        Self {
            backends,
            candidates,
            forced,
            recipe: RwLock::new(None),
            diagnostics,
            metrics,
        }
    }

    /// Identifier of the backend the fast path will use, if any
    pub fn current_backend(&self) -> Option<String> {
        self.recipe
            .read()
            .as_ref()
            .map(|recipe| recipe.backend_id().to_string())
    }

    pub fn forced_backend(&self) -> Option<&str> {
        self.forced.as_deref()
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    /// Build a fresh handle for `name`
    ///
    /// Tries the remembered recipe first, then discovery. Nothing is cached
    /// here; [`LoggerCache`](super::cache::LoggerCache) owns handle identity.
    ///
    /// # Errors
    ///
    /// - [`FacadeError::NoBackendAvailable`] when every candidate rejects,
    ///   carrying one reason per candidate
    /// - [`FacadeError::Initialization`] when the forced backend fails
    ///
    /// Both are also reported once on the diagnostics channel.
    pub fn resolve(&self, name: &str) -> Result<LogHandle> {
        // clone out so no lock is held while a constructor runs
        let recipe = self.recipe.read().clone();

        if let Some(recipe) = recipe {
            match recipe.build(name) {
                Ok(handle) => {
                    self.metrics.record_fast_path();
                    return Ok(handle);
                }
                Err(reason) => {
                    self.metrics.record_fast_path_failure();
                    self.diagnostics.warn(
                        "resolver",
                        format_args!(
                            "cached backend '{}' failed for '{}': {}; rediscovering",
                            recipe.backend_id(),
                            name,
                            reason
                        ),
                    );
                }
            }
        }

        self.discover(name)
    }

    fn discover(&self, name: &str) -> Result<LogHandle> {
        self.metrics.record_discovery();

        if let Some(ref forced) = self.forced {
            return match self.try_candidate(forced, name) {
                Ok(handle) => Ok(handle),
                Err(reason) => {
                    self.metrics.record_resolution_failure();
                    self.diagnostics.error(
                        "resolver",
                        format_args!(
                            "forced backend '{}' failed for '{}': {}",
                            forced, name, reason
                        ),
                    );
                    Err(FacadeError::initialization(
                        format!("backend '{}'", forced),
                        reason,
                    ))
                }
            };
        }

        let mut rejections = Vec::new();
        for id in self.candidates.iter() {
            match self.try_candidate(id, name) {
                Ok(handle) => return Ok(handle),
                Err(reason) => {
                    self.metrics.record_rejection();
                    self.diagnostics.warn(
                        "resolver",
                        format_args!("backend '{}' rejected for '{}': {}", id, name, reason),
                    );
                    rejections.push(CandidateRejection::new(id, reason));
                }
            }
        }

        self.metrics.record_resolution_failure();
        let err = FacadeError::no_backend(name, rejections);
        self.diagnostics.error("resolver", &err);
        Err(err)
    }

    /// Locate `id`, construct it, and on success make it the fast path
    fn try_candidate(&self, id: &str, name: &str) -> std::result::Result<LogHandle, String> {
        let backend = self
            .backends
            .get(id)
            .ok_or_else(|| format!("backend '{}' is not registered", id))?;

        let recipe = ConstructionRecipe::new(id, Arc::clone(backend));
        let handle = recipe.build(name)?;
        *self.recipe.write() = Some(recipe);
        Ok(handle)
    }
}

impl std::fmt::Debug for AdapterResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterResolver")
            .field("backends", &self.backends)
            .field("candidates", &self.candidates)
            .field("forced", &self.forced)
            .field("recipe", &*self.recipe.read())
            .finish()
    }
}
