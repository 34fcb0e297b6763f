//! Nutrition facts with clamped plausible ranges.
//!
//! Upstream analyzers report whatever they like; every numeric field is
//! independently clamped into a documented range before the value leaves
//! the adapter. The maxima are generous single-meal ceilings, not dietary
//! advice.

use serde::{Deserialize, Serialize};

/// Maximum plausible calories for a single analyzed item.
pub const CALORIES_MAX: u32 = 10_000;
/// Maximum plausible grams of protein.
pub const PROTEIN_MAX: u32 = 2_000;
/// Maximum plausible grams of carbohydrates.
pub const CARBS_MAX: u32 = 2_000;
/// Maximum plausible grams of fat.
pub const FAT_MAX: u32 = 2_000;
/// Maximum plausible grams of fiber.
pub const FIBER_MAX: u32 = 500;
/// Maximum plausible grams of sugar.
pub const SUGAR_MAX: u32 = 1_000;
/// Maximum plausible milligrams of sodium.
pub const SODIUM_MAX: u32 = 10_000;

/// Nutrition estimate for an analyzed food.
///
/// All fields are non-negative integers. Calories are kcal, sodium is mg,
/// everything else is grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
    pub sugar: u32,
    pub sodium: u32,
}

impl NutritionFacts {
    /// Build facts from raw (possibly negative or absurd) upstream values,
    /// clamping each field independently into its documented range.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        calories: i64,
        protein: i64,
        carbs: i64,
        fat: i64,
        fiber: i64,
        sugar: i64,
        sodium: i64,
    ) -> Self {
        Self {
            calories: clamp_field(calories, CALORIES_MAX),
            protein: clamp_field(protein, PROTEIN_MAX),
            carbs: clamp_field(carbs, CARBS_MAX),
            fat: clamp_field(fat, FAT_MAX),
            fiber: clamp_field(fiber, FIBER_MAX),
            sugar: clamp_field(sugar, SUGAR_MAX),
            sodium: clamp_field(sodium, SODIUM_MAX),
        }
    }

    /// Whether every field sits within its documented range.
    pub fn is_plausible(&self) -> bool {
        self.calories <= CALORIES_MAX
            && self.protein <= PROTEIN_MAX
            && self.carbs <= CARBS_MAX
            && self.fat <= FAT_MAX
            && self.fiber <= FIBER_MAX
            && self.sugar <= SUGAR_MAX
            && self.sodium <= SODIUM_MAX
    }
}

/// Clamp a raw upstream value into `0..=max`.
fn clamp_field(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}
