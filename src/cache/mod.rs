//! Consistent-result cache for analysis responses.
//!
//! [`AnalysisCache`] memoizes analysis results per
//! [`Fingerprint`](crate::fingerprint::Fingerprint), guaranteeing that
//! repeated submissions of materially identical content under the same
//! personalization context return the identical verdict without touching
//! the external analyzer.
//!
//! # Eviction
//!
//! Bounded by a capacity threshold (default 500 entries). When an insert
//! would exceed capacity, the single oldest-inserted entry is removed
//! first — strict insertion order, not LRU. Correctness only requires
//! boundedness; hit-rate optimality is not a goal here.
//!
//! # Concurrency
//!
//! `get`/`insert` are guarded by a `std::sync::Mutex` so a fingerprint can
//! never hold two divergent stored results, even under parallel mutation.
//! The critical sections are a map lookup or a map insert plus a deque
//! push — never I/O — so contention stays negligible.
//!
//! The cache is process-local and rebuilt empty on restart; only
//! intra-process consistency is promised.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use crate::fingerprint::Fingerprint;
use crate::telemetry;
use crate::types::AnalysisResult;

/// Default maximum number of cached analysis results.
const DEFAULT_CAPACITY: usize = 500;

/// Configuration for the analysis cache.
///
/// ```rust
/// # use platecheck::CacheConfig;
/// let config = CacheConfig::new().capacity(1_000);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 500.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn capacity(mut self, n: usize) -> Self {
        self.capacity = n;
        self
    }
}

/// Insertion-order bookkeeping behind the mutex.
struct CacheInner {
    entries: HashMap<Fingerprint, AnalysisResult>,
    /// Fingerprints in insertion order; front = oldest.
    order: VecDeque<Fingerprint>,
}

/// Bounded in-memory cache mapping fingerprints to analysis results.
pub struct AnalysisCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl AnalysisCache {
    /// Create an empty cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: config.capacity.max(1),
        }
    }

    /// Look up a cached result.
    ///
    /// Returns a clone on hit, `None` on miss. Emits hit/miss counters.
    pub fn get(&self, fingerprint: Fingerprint) -> Option<AnalysisResult> {
        let inner = self.lock();
        match inner.entries.get(&fingerprint) {
            Some(result) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                Some(result.clone())
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Insert a result, evicting the oldest entry first if at capacity.
    ///
    /// Cached results are immutable: inserting under a fingerprint that is
    /// already present keeps the first-stored value and does not disturb
    /// the eviction order.
    pub fn insert(&self, fingerprint: Fingerprint, result: AnalysisResult) {
        let mut inner = self.lock();
        if inner.entries.contains_key(&fingerprint) {
            return;
        }
        while inner.entries.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                    metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL).increment(1);
                }
                None => break,
            }
        }
        inner.entries.insert(fingerprint, result);
        inner.order.push_back(fingerprint);
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict all entries.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    /// The configured capacity threshold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        // A poisoned lock only means another thread panicked mid-insert;
        // the map and deque are still structurally sound.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
