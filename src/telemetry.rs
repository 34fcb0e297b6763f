//! Telemetry metric name constants.
//!
//! Centralised metric names for platecheck operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `platecheck_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `analyzer` — analyzer name (e.g. "gemini")
//! - `endpoint` — admission endpoint name (e.g. "analyze")
//! - `status` — outcome: "ok" or "error"
//! - `method` — result provenance: "ai" or "fallback"

/// Total analysis requests dispatched through the engine.
///
/// Labels: `analyzer`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "platecheck_requests_total";

/// Analyzer call duration in seconds.
///
/// Labels: `analyzer`.
pub const REQUEST_DURATION_SECONDS: &str = "platecheck_request_duration_seconds";

/// Total fingerprint cache hits.
pub const CACHE_HITS_TOTAL: &str = "platecheck_cache_hits_total";

/// Total fingerprint cache misses.
pub const CACHE_MISSES_TOTAL: &str = "platecheck_cache_misses_total";

/// Total entries evicted from the fingerprint cache (capacity policy).
pub const CACHE_EVICTIONS_TOTAL: &str = "platecheck_cache_evictions_total";

/// Total admission rejections (duplicate in-flight request).
///
/// Labels: `endpoint`.
pub const ADMISSION_REJECTIONS_TOTAL: &str = "platecheck_admission_rejections_total";

/// Total stale admission slots force-released by the sweep.
pub const STALE_SLOTS_RELEASED_TOTAL: &str = "platecheck_stale_slots_released_total";

/// Total analyses served by the heuristic fallback table.
pub const FALLBACK_ANALYSES_TOTAL: &str = "platecheck_fallback_analyses_total";
