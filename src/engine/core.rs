//! AnalysisEngine — orchestrates admission, cache, analyzer, and fallback.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::admission::AdmissionGate;
use crate::analyzers::{FallbackTable, FoodAnalyzer};
use crate::cache::AnalysisCache;
use crate::fingerprint::fingerprint;
use crate::telemetry;
use crate::types::{AnalysisRequest, AnalysisResult, UserProfile};
use crate::{PlatecheckError, Result};

/// Admission endpoint name for the analysis operation.
pub const ANALYZE_ENDPOINT: &str = "analyze";

/// The food-analysis orchestrator.
///
/// Composes the admission gate, fingerprint cache, AI analyzer, and
/// heuristic fallback. Construct via
/// [`Platecheck::builder()`](crate::Platecheck::builder).
///
/// Side effects requested by callers — persisting a log row, awarding
/// points — live outside this engine and are never memoized: only the
/// analysis result itself is cached.
pub struct AnalysisEngine {
    analyzer: Arc<dyn FoodAnalyzer>,
    fallback: FallbackTable,
    cache: AnalysisCache,
    gate: Arc<AdmissionGate>,
}

impl AnalysisEngine {
    pub(crate) fn new(
        analyzer: Arc<dyn FoodAnalyzer>,
        fallback: FallbackTable,
        cache: AnalysisCache,
        gate: Arc<AdmissionGate>,
    ) -> Self {
        Self {
            analyzer,
            fallback,
            cache,
            gate,
        }
    }

    /// Analyze a food submission for a user.
    ///
    /// Flow: missing-input check → admission → cache lookup → AI analyzer
    /// → heuristic fallback on analyzer failure → cache insert. The
    /// admission slot is released when this call returns, on every path.
    ///
    /// # Errors
    ///
    /// - [`MissingInput`](PlatecheckError::MissingInput) when the request
    ///   carries neither a food name nor image data.
    /// - [`AdmissionConflict`](PlatecheckError::AdmissionConflict) when
    ///   this user already has an analysis in flight; retry after the
    ///   carried delay.
    ///
    /// Analyzer failures are not surfaced — the caller receives a
    /// heuristic result whose `method` tag reads `fallback`.
    #[instrument(skip(self, request, profile))]
    pub async fn analyze(
        &self,
        user_id: &str,
        request: &AnalysisRequest,
        profile: &UserProfile,
    ) -> Result<AnalysisResult> {
        if request.is_empty() {
            return Err(PlatecheckError::MissingInput);
        }

        // Held for the rest of this call; dropping on any exit path frees
        // the user's slot.
        let _permit = self.gate.try_admit(user_id, ANALYZE_ENDPOINT)?;

        let key = fingerprint(request, profile);
        if let Some(key) = key
            && let Some(cached) = self.cache.get(key)
        {
            debug!(%key, "analysis served from cache");
            return Ok(cached);
        }

        let result = self.run_analyzer(request, profile).await;

        if let Some(key) = key {
            self.cache.insert(key, result.clone());
        }
        Ok(result)
    }

    /// Call the AI analyzer, falling back to the heuristic table on any
    /// failure. Infallible by design: AI trouble must stay invisible to
    /// the end user.
    async fn run_analyzer(
        &self,
        request: &AnalysisRequest,
        profile: &UserProfile,
    ) -> AnalysisResult {
        let name = self.analyzer.name();
        let start = Instant::now();
        match self.analyzer.analyze(request, profile).await {
            Ok(result) => {
                Self::record_request(name, start, true);
                result
            }
            Err(e) => {
                Self::record_request(name, start, false);
                warn!(analyzer = name, error = %e, "analyzer failed, using fallback table");
                metrics::counter!(telemetry::FALLBACK_ANALYSES_TOTAL).increment(1);
                self.fallback
                    .analyze(request.food_name.as_deref().unwrap_or(""))
            }
        }
    }

    /// Spawn the periodic stale-slot sweeper.
    ///
    /// Optional safety net: `try_admit` already self-heals stale slots
    /// inline. Must be called from within a tokio runtime; abort the
    /// returned handle to stop the sweeper.
    pub fn spawn_slot_sweeper(&self) -> tokio::task::JoinHandle<()> {
        let gate = Arc::clone(&self.gate);
        let period = gate.config().sweep_interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick fires immediately; skip it so a fresh engine
            // doesn't sweep before anything could go stale.
            interval.tick().await;
            loop {
                interval.tick().await;
                gate.sweep_stale();
            }
        })
    }

    /// Number of results currently cached.
    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }

    /// Number of admission slots currently held.
    pub fn live_slots(&self) -> usize {
        self.gate.live_slots()
    }

    /// Record analyzer call outcome metrics (counter + histogram).
    fn record_request(analyzer: &str, start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        let elapsed = start.elapsed().as_secs_f64();
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "analyzer" => analyzer.to_owned(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "analyzer" => analyzer.to_owned(),
        )
        .record(elapsed);
    }
}
