//! Core FoodAnalyzer trait

use async_trait::async_trait;

use crate::Result;
use crate::types::{AnalysisRequest, AnalysisResult, UserProfile};

/// An external analyzer that turns a food submission into a verdict.
///
/// Implementations must fail loudly: on any network error, malformed
/// payload, missing field, or out-of-set verdict they return `Err` and
/// never a partially-populated or guessed result. Guessing is the
/// engine's explicit fallback responsibility, not the analyzer's.
#[async_trait]
pub trait FoodAnalyzer: Send + Sync {
    /// Short analyzer name for logs and metrics (e.g. "gemini").
    fn name(&self) -> &str;

    /// Analyze a food submission under a user's personalization context.
    ///
    /// May suspend on network I/O. A successful result is fully
    /// sanitized: nutrition fields and confidence inside their documented
    /// ranges, alternatives empty for a YES verdict.
    async fn analyze(
        &self,
        request: &AnalysisRequest,
        profile: &UserProfile,
    ) -> Result<AnalysisResult>;
}
