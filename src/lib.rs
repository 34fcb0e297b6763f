//! Platecheck - food analysis core for nutrition verdicts
//!
//! This crate is the consistency layer that sits in front of an AI food
//! analyzer: it fingerprints each submission together with the user's
//! personalization profile, memoizes verdicts so identical submissions
//! return identical answers, admits at most one in-flight analysis per
//! user, and falls back to a heuristic keyword table when the AI is
//! unavailable — invisibly to the end user.
//!
//! # Example
//!
//! ```rust,no_run
//! use platecheck::{AnalysisRequest, Platecheck, UserProfile};
//!
//! #[tokio::main]
//! async fn main() -> platecheck::Result<()> {
//!     let engine = Platecheck::builder()
//!         .gemini("your-api-key")
//!         .build()?;
//!
//!     let profile = UserProfile::new("free").health_goals(["weight_loss"]);
//!     let result = engine
//!         .analyze("user-123", &AnalysisRequest::food("apple"), &profile)
//!         .await?;
//!
//!     println!("{}: {} kcal ({})", result.verdict, result.nutrition.calories, result.portion);
//!     Ok(())
//! }
//! ```
//!
//! # Guarantees
//!
//! - Identical food content under an identical profile yields the
//!   identical cached verdict; any profile change (tier, allergies,
//!   preferences, goals) yields a fresh analysis.
//! - A user's second concurrent submission is rejected fail-fast with a
//!   retry hint — duplicate analyzer calls cannot be fired by
//!   double-submitting.
//! - Analyzer failures never reach the caller; the heuristic fallback
//!   answers instead, tagged with `method: fallback`.
//!
//! State is process-local and rebuilt empty on restart; persistence and
//! gamification side effects belong to the host application.

pub mod admission;
pub mod analyzers;
pub mod cache;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use admission::{AdmissionConfig, AdmissionGate, AdmissionPermit};
pub use analyzers::{FallbackTable, FoodAnalyzer, GeminiClient};
pub use cache::{AnalysisCache, CacheConfig};
pub use engine::{ANALYZE_ENDPOINT, AnalysisEngine, Platecheck, PlatecheckBuilder};
pub use error::{PlatecheckError, Result};
pub use fingerprint::{Fingerprint, fingerprint};

// Re-export all types
pub use types::{
    AnalysisMethod, AnalysisRequest, AnalysisResult, NutritionFacts, UserProfile, Verdict,
};
