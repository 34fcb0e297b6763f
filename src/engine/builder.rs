//! Builder for configuring engine instances

use std::sync::Arc;

use super::core::AnalysisEngine;
use crate::admission::{AdmissionConfig, AdmissionGate};
use crate::analyzers::{FallbackTable, FoodAnalyzer, GeminiClient};
use crate::cache::{AnalysisCache, CacheConfig};
use crate::{PlatecheckError, Result};

/// Main entry point for creating engine instances.
pub struct Platecheck;

impl Platecheck {
    /// Create a new builder for configuring the engine.
    pub fn builder() -> PlatecheckBuilder {
        PlatecheckBuilder::new()
    }
}

/// Builder for configuring engine instances.
///
/// The engine owns its cache and admission registry (no ambient global
/// state); construct one per process and share it behind an `Arc`, or
/// build isolated instances per test case.
pub struct PlatecheckBuilder {
    gemini_key: Option<String>,
    gemini_model: Option<String>,
    analyzer: Option<Arc<dyn FoodAnalyzer>>,
    cache: CacheConfig,
    admission: AdmissionConfig,
    fallback_seed: Option<u64>,
}

impl PlatecheckBuilder {
    pub fn new() -> Self {
        Self {
            gemini_key: None,
            gemini_model: None,
            analyzer: None,
            cache: CacheConfig::default(),
            admission: AdmissionConfig::default(),
            fallback_seed: None,
        }
    }

    /// Configure the Gemini analyzer with an API key.
    pub fn gemini(mut self, api_key: impl Into<String>) -> Self {
        self.gemini_key = Some(api_key.into());
        self
    }

    /// Override the Gemini model (default: "gemini-1.5-flash").
    pub fn gemini_model(mut self, model: impl Into<String>) -> Self {
        self.gemini_model = Some(model.into());
        self
    }

    /// Install a custom analyzer, taking priority over `.gemini()`.
    ///
    /// This is also the mock seam for tests.
    pub fn analyzer(mut self, analyzer: Arc<dyn FoodAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Configure the analysis cache.
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    /// Configure the admission gate.
    pub fn admission(mut self, config: AdmissionConfig) -> Self {
        self.admission = config;
        self
    }

    /// Seed the fallback table's random source, for deterministic output.
    pub fn fallback_seed(mut self, seed: u64) -> Self {
        self.fallback_seed = Some(seed);
        self
    }

    /// Build the engine.
    ///
    /// Fails with [`NoAnalyzer`](PlatecheckError::NoAnalyzer) when neither
    /// a custom analyzer nor a Gemini key is configured. Synchronous —
    /// nothing is spawned here; see
    /// [`AnalysisEngine::spawn_slot_sweeper`].
    pub fn build(self) -> Result<AnalysisEngine> {
        let analyzer: Arc<dyn FoodAnalyzer> = match (self.analyzer, self.gemini_key) {
            (Some(analyzer), _) => analyzer,
            (None, Some(key)) => {
                let mut client = GeminiClient::new(key);
                if let Some(model) = self.gemini_model {
                    client = client.model(model);
                }
                Arc::new(client)
            }
            (None, None) => return Err(PlatecheckError::NoAnalyzer),
        };

        let fallback = match self.fallback_seed {
            Some(seed) => FallbackTable::with_seed(seed),
            None => FallbackTable::new(),
        };

        Ok(AnalysisEngine::new(
            analyzer,
            fallback,
            AnalysisCache::new(&self.cache),
            Arc::new(AdmissionGate::new(self.admission)),
        ))
    }
}

impl Default for PlatecheckBuilder {
    fn default() -> Self {
        Self::new()
    }
}
