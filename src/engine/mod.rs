//! Engine composition: builder and orchestrator.

mod builder;
mod core;

pub use builder::{Platecheck, PlatecheckBuilder};
pub use core::{ANALYZE_ENDPOINT, AnalysisEngine};
