//! The analysis result value object.

use serde::{Deserialize, Serialize};

use super::nutrition::NutritionFacts;
use super::verdict::Verdict;

/// Lowest confidence an analysis may report.
pub const CONFIDENCE_MIN: u8 = 80;
/// Highest confidence an analysis may report.
pub const CONFIDENCE_MAX: u8 = 99;

/// How a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMethod {
    /// Produced by the external AI analyzer.
    Ai,
    /// Produced by the heuristic fallback table.
    Fallback,
}

/// Result of analyzing a food for a specific user profile.
///
/// Created once per unique fingerprint and immutable thereafter — the
/// cache hands out clones of the first-computed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The recognized or submitted food name.
    pub food_name: String,
    /// YES / NO / OK verdict.
    pub verdict: Verdict,
    /// Human-readable explanation of the verdict.
    pub explanation: String,
    /// Clamped nutrition estimate.
    pub nutrition: NutritionFacts,
    /// Confidence in the verdict, clamped to 80–99. Feeds UI trust
    /// signals, so upstream values are never trusted blindly.
    pub confidence: u8,
    /// Portion the estimate refers to (e.g. "1 medium apple").
    pub portion: String,
    /// Suggested alternative foods. Empty when the verdict is YES.
    pub alternatives: Vec<String>,
    /// Result provenance.
    pub method: AnalysisMethod,
}

/// Clamp a raw upstream confidence into the 80–99 band.
pub fn clamp_confidence(value: i64) -> u8 {
    value.clamp(i64::from(CONFIDENCE_MIN), i64::from(CONFIDENCE_MAX)) as u8
}
