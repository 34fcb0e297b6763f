//! Per-user request admission.
//!
//! [`AdmissionGate`] is a fail-fast mutual-exclusion filter: while a user
//! has an analysis in flight on an endpoint, a second request from the
//! same user on the same endpoint is rejected with a retry hint instead
//! of being queued. This stops double-submits from firing duplicate
//! expensive analyzer calls (and duplicate downstream point awards).
//!
//! State machine per (user, endpoint) pair:
//!
//! ```text
//! Idle → Admitted → (Completed | Aborted) → Idle
//! ```
//!
//! There is no waiting state. Admission hands back an [`AdmissionPermit`];
//! dropping the permit releases the slot, so success, error, and unwind
//! paths all release identically.
//!
//! # Stale slots
//!
//! A request that dies without dropping its permit (process-level
//! accidents, leaked handles) would wedge its user forever. Two recovery
//! paths exist: `try_admit` replaces a slot older than the staleness
//! threshold inline, and [`sweep_stale`](AdmissionGate::sweep_stale) —
//! typically driven by a periodic task, see
//! [`AnalysisEngine::spawn_slot_sweeper`](crate::AnalysisEngine::spawn_slot_sweeper)
//! — releases all such slots in bulk.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::telemetry;
use crate::{PlatecheckError, Result};

/// Configuration for the admission gate.
///
/// ```rust
/// # use platecheck::AdmissionConfig;
/// # use std::time::Duration;
/// let config = AdmissionConfig::new()
///     .retry_after(Duration::from_secs(3))
///     .stale_after(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone)]
pub struct AdmissionConfig {
    /// Retry delay suggested to rejected callers. Default: 5 s.
    pub retry_after: Duration,
    /// Age past which a live slot counts as abandoned. Default: 5 min.
    pub stale_after: Duration,
    /// How often the sweeper task runs. Default: 60 s.
    pub sweep_interval: Duration,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            retry_after: Duration::from_secs(5),
            stale_after: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl AdmissionConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retry delay suggested to rejected callers.
    pub fn retry_after(mut self, delay: Duration) -> Self {
        self.retry_after = delay;
        self
    }

    /// Set the age past which a slot counts as abandoned.
    pub fn stale_after(mut self, age: Duration) -> Self {
        self.stale_after = age;
        self
    }

    /// Set the sweeper interval.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Identity of an admission slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SlotKey {
    user_id: String,
    endpoint: String,
}

type SlotMap = HashMap<SlotKey, Instant>;

/// Fail-fast per-(user, endpoint) admission filter.
pub struct AdmissionGate {
    slots: Arc<Mutex<SlotMap>>,
    config: AdmissionConfig,
}

impl AdmissionGate {
    /// Create an empty gate with the given configuration.
    pub fn new(config: AdmissionConfig) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    /// Try to admit a request for `user_id` on `endpoint`.
    ///
    /// Returns a permit on success; the slot is held until the permit is
    /// dropped. If the pair already holds a live slot the request is
    /// rejected immediately with
    /// [`AdmissionConflict`](PlatecheckError::AdmissionConflict) — never
    /// queued. A slot older than the staleness threshold is treated as
    /// abandoned and replaced.
    pub fn try_admit(&self, user_id: &str, endpoint: &str) -> Result<AdmissionPermit> {
        let key = SlotKey {
            user_id: user_id.to_string(),
            endpoint: endpoint.to_string(),
        };
        let now = Instant::now();

        let mut slots = lock(&self.slots);
        if let Some(admitted_at) = slots.get(&key) {
            if now.duration_since(*admitted_at) < self.config.stale_after {
                metrics::counter!(telemetry::ADMISSION_REJECTIONS_TOTAL,
                    "endpoint" => endpoint.to_owned(),
                )
                .increment(1);
                debug!(user_id, endpoint, "admission rejected: request in flight");
                return Err(PlatecheckError::AdmissionConflict {
                    retry_after: self.config.retry_after,
                });
            }
            warn!(user_id, endpoint, "replacing stale admission slot");
        }
        slots.insert(key.clone(), now);

        Ok(AdmissionPermit {
            key,
            admitted_at: now,
            slots: Arc::clone(&self.slots),
        })
    }

    /// Release every slot older than the staleness threshold.
    ///
    /// Returns the number of slots released. Safety net for requests that
    /// terminated without dropping their permit; not a cancellation
    /// mechanism.
    pub fn sweep_stale(&self) -> usize {
        let now = Instant::now();
        let mut slots = lock(&self.slots);
        let before = slots.len();
        slots.retain(|_, admitted_at| now.duration_since(*admitted_at) < self.config.stale_after);
        let released = before - slots.len();
        if released > 0 {
            metrics::counter!(telemetry::STALE_SLOTS_RELEASED_TOTAL).increment(released as u64);
            warn!(released, "released stale admission slots");
        }
        released
    }

    /// Number of currently held slots.
    pub fn live_slots(&self) -> usize {
        lock(&self.slots).len()
    }

    /// The gate's configuration.
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }
}

/// Proof of admission for one request.
///
/// Dropping the permit releases the (user, endpoint) slot, whatever path
/// the request took to get there.
pub struct AdmissionPermit {
    key: SlotKey,
    admitted_at: Instant,
    slots: Arc<Mutex<SlotMap>>,
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        let mut slots = lock(&self.slots);
        // Only release the slot this permit was issued for. After a stale
        // replacement or a sweep the key may belong to a newer admission;
        // a late drop must not free someone else's slot.
        if slots.get(&self.key) == Some(&self.admitted_at) {
            slots.remove(&self.key);
        }
    }
}

impl std::fmt::Debug for AdmissionPermit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionPermit")
            .field("user_id", &self.key.user_id)
            .field("endpoint", &self.key.endpoint)
            .finish()
    }
}

fn lock(slots: &Mutex<SlotMap>) -> std::sync::MutexGuard<'_, SlotMap> {
    // Slot bookkeeping stays structurally sound across a panic elsewhere.
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}
