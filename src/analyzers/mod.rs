//! Food analyzers: the external AI adapter, its heuristic fallback, and
//! the trait seam between them and the engine.

mod fallback;
mod gemini;
mod traits;

pub use fallback::FallbackTable;
pub use gemini::GeminiClient;
pub use traits::FoodAnalyzer;
