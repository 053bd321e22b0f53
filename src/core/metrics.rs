//! Facade metrics for observability
//!
//! Counts cache traffic and resolution work so callers (and tests) can see
//! whether lookups are being served from cache, from the remembered recipe,
//! or from a full discovery walk.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by a registry and every factory it creates
///
/// # Example
///
/// ```
/// use rust_log_facade::FacadeMetrics;
///
/// let metrics = FacadeMetrics::new();
/// metrics.record_logger_hit();
/// metrics.record_logger_miss();
///
/// assert_eq!(metrics.logger_cache_hits(), 1);
/// assert_eq!(metrics.hit_rate(), 50.0);
/// ```
#[derive(Debug, Default)]
pub struct FacadeMetrics {
    factories_created: AtomicU64,
    factories_discarded: AtomicU64,
    factory_cache_hits: AtomicU64,
    logger_cache_hits: AtomicU64,
    logger_cache_misses: AtomicU64,
    fast_path_constructions: AtomicU64,
    fast_path_failures: AtomicU64,
    discovery_walks: AtomicU64,
    candidate_rejections: AtomicU64,
    resolution_failures: AtomicU64,
}

/// Point-in-time copy of [`FacadeMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub factories_created: u64,
    pub factories_discarded: u64,
    pub factory_cache_hits: u64,
    pub logger_cache_hits: u64,
    pub logger_cache_misses: u64,
    pub fast_path_constructions: u64,
    pub fast_path_failures: u64,
    pub discovery_walks: u64,
    pub candidate_rejections: u64,
    pub resolution_failures: u64,
}

impl FacadeMetrics {
    pub const fn new() -> Self {
        Self {
            factories_created: AtomicU64::new(0),
            factories_discarded: AtomicU64::new(0),
            factory_cache_hits: AtomicU64::new(0),
            logger_cache_hits: AtomicU64::new(0),
            logger_cache_misses: AtomicU64::new(0),
            fast_path_constructions: AtomicU64::new(0),
            fast_path_failures: AtomicU64::new(0),
            discovery_walks: AtomicU64::new(0),
            candidate_rejections: AtomicU64::new(0),
            resolution_failures: AtomicU64::new(0),
        }
    }

    /// Factories published into the registry
    #[inline]
    pub fn factories_created(&self) -> u64 {
        self.factories_created.load(Ordering::Relaxed)
    }

    /// Factories constructed but dropped because another one was published first
    #[inline]
    pub fn factories_discarded(&self) -> u64 {
        self.factories_discarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn factory_cache_hits(&self) -> u64 {
        self.factory_cache_hits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn logger_cache_hits(&self) -> u64 {
        self.logger_cache_hits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn logger_cache_misses(&self) -> u64 {
        self.logger_cache_misses.load(Ordering::Relaxed)
    }

    /// Handles built straight from the remembered recipe
    #[inline]
    pub fn fast_path_constructions(&self) -> u64 {
        self.fast_path_constructions.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fast_path_failures(&self) -> u64 {
        self.fast_path_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn discovery_walks(&self) -> u64 {
        self.discovery_walks.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn candidate_rejections(&self) -> u64 {
        self.candidate_rejections.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn resolution_failures(&self) -> u64 {
        self.resolution_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_factory_created(&self) -> u64 {
        self.factories_created.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_factory_discarded(&self) -> u64 {
        self.factories_discarded.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_factory_hit(&self) -> u64 {
        self.factory_cache_hits.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logger_hit(&self) -> u64 {
        self.logger_cache_hits.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logger_miss(&self) -> u64 {
        self.logger_cache_misses.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fast_path(&self) -> u64 {
        self.fast_path_constructions.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fast_path_failure(&self) -> u64 {
        self.fast_path_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_discovery(&self) -> u64 {
        self.discovery_walks.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejection(&self) -> u64 {
        self.candidate_rejections.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_resolution_failure(&self) -> u64 {
        self.resolution_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Logger cache hit rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no lookups have happened.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.logger_cache_hits();
        let total = hits + self.logger_cache_misses();
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            factories_created: self.factories_created(),
            factories_discarded: self.factories_discarded(),
            factory_cache_hits: self.factory_cache_hits(),
            logger_cache_hits: self.logger_cache_hits(),
            logger_cache_misses: self.logger_cache_misses(),
            fast_path_constructions: self.fast_path_constructions(),
            fast_path_failures: self.fast_path_failures(),
            discovery_walks: self.discovery_walks(),
            candidate_rejections: self.candidate_rejections(),
            resolution_failures: self.resolution_failures(),
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.factories_created.store(0, Ordering::Relaxed);
        self.factories_discarded.store(0, Ordering::Relaxed);
        self.factory_cache_hits.store(0, Ordering::Relaxed);
        self.logger_cache_hits.store(0, Ordering::Relaxed);
        self.logger_cache_misses.store(0, Ordering::Relaxed);
        self.fast_path_constructions.store(0, Ordering::Relaxed);
        self.fast_path_failures.store(0, Ordering::Relaxed);
        self.discovery_walks.store(0, Ordering::Relaxed);
        self.candidate_rejections.store(0, Ordering::Relaxed);
        self.resolution_failures.store(0, Ordering::Relaxed);
    }
}
