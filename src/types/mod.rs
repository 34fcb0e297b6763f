//! Public types for the Platecheck API.

mod analysis;
mod nutrition;
mod profile;
mod request;
mod verdict;

pub use analysis::{AnalysisMethod, AnalysisResult, CONFIDENCE_MAX, CONFIDENCE_MIN, clamp_confidence};
pub use nutrition::{
    CALORIES_MAX, CARBS_MAX, FAT_MAX, FIBER_MAX, NutritionFacts, PROTEIN_MAX, SODIUM_MAX,
    SUGAR_MAX,
};
pub use profile::UserProfile;
pub use request::AnalysisRequest;
pub use verdict::Verdict;
