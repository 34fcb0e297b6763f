//! Heuristic fallback analysis.
//!
//! When the AI analyzer fails, the engine answers from a fixed keyword
//! table so the product experience stays uninterrupted. This is a
//! deliberate stand-in, not a nutrition model — numerical accuracy is out
//! of scope.
//!
//! Matching is a case-insensitive substring scan over the table in
//! declaration order; the first match wins, so matched keywords behave
//! identically across runs. Only the no-match branch is randomized, and
//! the random source is seedable so tests can pin exact outputs.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{
    AnalysisMethod, AnalysisResult, CONFIDENCE_MIN, NutritionFacts, Verdict,
};

/// One keyword's canned analysis.
struct TableEntry {
    verdict: Verdict,
    explanation: &'static str,
    calories: u32,
    protein: u32,
    carbs: u32,
    fat: u32,
    fiber: u32,
    sugar: u32,
    sodium: u32,
    confidence: u8,
    portion: &'static str,
    alternatives: &'static [&'static str],
}

/// Keyword table, scanned top to bottom. Declaration order is load-bearing:
/// "chicken salad" must resolve to the salad entry, not the fried-chicken
/// one further down.
#[rustfmt::skip]
const TABLE: &[(&str, TableEntry)] = &[
    ("apple", TableEntry {
        verdict: Verdict::Yes,
        explanation: "Whole fruit with fiber and micronutrients; a solid everyday choice.",
        calories: 95, protein: 0, carbs: 25, fat: 0, fiber: 4, sugar: 19, sodium: 2,
        confidence: 95, portion: "1 medium apple", alternatives: &[],
    }),
    ("banana", TableEntry {
        verdict: Verdict::Yes,
        explanation: "Potassium-rich fruit; quick energy with useful fiber.",
        calories: 105, protein: 1, carbs: 27, fat: 0, fiber: 3, sugar: 14, sodium: 1,
        confidence: 95, portion: "1 medium banana", alternatives: &[],
    }),
    ("salad", TableEntry {
        verdict: Verdict::Yes,
        explanation: "Vegetable-forward and nutrient-dense; watch heavy dressings.",
        calories: 150, protein: 5, carbs: 12, fat: 9, fiber: 4, sugar: 4, sodium: 180,
        confidence: 90, portion: "1 bowl", alternatives: &[],
    }),
    ("oatmeal", TableEntry {
        verdict: Verdict::Yes,
        explanation: "Slow-release carbs and soluble fiber; filling breakfast.",
        calories: 160, protein: 6, carbs: 27, fat: 3, fiber: 4, sugar: 1, sodium: 115,
        confidence: 93, portion: "1 cup cooked", alternatives: &[],
    }),
    ("yogurt", TableEntry {
        verdict: Verdict::Yes,
        explanation: "Protein and probiotics; plain versions keep sugar low.",
        calories: 140, protein: 12, carbs: 9, fat: 5, fiber: 0, sugar: 9, sodium: 65,
        confidence: 91, portion: "1 cup", alternatives: &[],
    }),
    ("grilled chicken", TableEntry {
        verdict: Verdict::Yes,
        explanation: "Lean protein with minimal added fat.",
        calories: 185, protein: 35, carbs: 0, fat: 4, fiber: 0, sugar: 0, sodium: 85,
        confidence: 94, portion: "1 breast (120 g)", alternatives: &[],
    }),
    ("salmon", TableEntry {
        verdict: Verdict::Yes,
        explanation: "Omega-3 fats and high-quality protein.",
        calories: 230, protein: 25, carbs: 0, fat: 14, fiber: 0, sugar: 0, sodium: 60,
        confidence: 94, portion: "1 fillet (120 g)", alternatives: &[],
    }),
    ("egg", TableEntry {
        verdict: Verdict::Yes,
        explanation: "Complete protein in a small package.",
        calories: 78, protein: 6, carbs: 1, fat: 5, fiber: 0, sugar: 0, sodium: 62,
        confidence: 93, portion: "1 large egg", alternatives: &[],
    }),
    ("rice", TableEntry {
        verdict: Verdict::Ok,
        explanation: "Fine as a base; portion size decides whether it fits your goals.",
        calories: 205, protein: 4, carbs: 45, fat: 0, fiber: 1, sugar: 0, sodium: 2,
        confidence: 88, portion: "1 cup cooked",
        alternatives: &["cauliflower rice", "quinoa", "brown rice"],
    }),
    ("pasta", TableEntry {
        verdict: Verdict::Ok,
        explanation: "Refined carbs; works in moderation, better with protein and vegetables.",
        calories: 220, protein: 8, carbs: 43, fat: 1, fiber: 3, sugar: 1, sodium: 1,
        confidence: 88, portion: "1 cup cooked",
        alternatives: &["whole-grain pasta", "zucchini noodles", "lentil pasta"],
    }),
    ("sandwich", TableEntry {
        verdict: Verdict::Ok,
        explanation: "Depends heavily on the filling; lean protein versions are fine.",
        calories: 330, protein: 15, carbs: 38, fat: 12, fiber: 3, sugar: 5, sodium: 650,
        confidence: 85, portion: "1 sandwich",
        alternatives: &["open-faced sandwich", "wrap with grilled chicken", "salad bowl"],
    }),
    ("pizza", TableEntry {
        verdict: Verdict::No,
        explanation: "High in refined carbs, saturated fat, and sodium per slice.",
        calories: 285, protein: 12, carbs: 36, fat: 10, fiber: 2, sugar: 4, sodium: 640,
        confidence: 90, portion: "1 slice",
        alternatives: &["flatbread with vegetables", "caprese salad", "whole-grain toast with tomato"],
    }),
    ("burger", TableEntry {
        verdict: Verdict::No,
        explanation: "Heavy saturated fat and sodium load in a typical serving.",
        calories: 540, protein: 25, carbs: 40, fat: 27, fiber: 2, sugar: 8, sodium: 950,
        confidence: 90, portion: "1 burger",
        alternatives: &["turkey burger", "grilled chicken sandwich", "portobello burger"],
    }),
    ("fries", TableEntry {
        verdict: Verdict::No,
        explanation: "Deep-fried starch; high fat and sodium, little else.",
        calories: 365, protein: 4, carbs: 48, fat: 17, fiber: 4, sugar: 0, sodium: 246,
        confidence: 92, portion: "1 medium serving",
        alternatives: &["baked sweet potato wedges", "side salad", "roasted vegetables"],
    }),
    ("soda", TableEntry {
        verdict: Verdict::No,
        explanation: "Pure added sugar with no nutritional payload.",
        calories: 150, protein: 0, carbs: 39, fat: 0, fiber: 0, sugar: 39, sodium: 45,
        confidence: 96, portion: "1 can (355 ml)",
        alternatives: &["sparkling water", "unsweetened iced tea", "water with lemon"],
    }),
    ("donut", TableEntry {
        verdict: Verdict::No,
        explanation: "Fried dough with sugar glaze; a dense calorie hit.",
        calories: 300, protein: 4, carbs: 35, fat: 16, fiber: 1, sugar: 15, sodium: 270,
        confidence: 94, portion: "1 donut",
        alternatives: &["whole-grain muffin", "fruit with yogurt", "toast with peanut butter"],
    }),
    ("chocolate", TableEntry {
        verdict: Verdict::No,
        explanation: "Sugar-dense treat; dark varieties are the lesser evil.",
        calories: 235, protein: 3, carbs: 26, fat: 13, fiber: 3, sugar: 21, sodium: 35,
        confidence: 89, portion: "1 bar (43 g)",
        alternatives: &["dark chocolate square", "fresh berries", "dates with almond butter"],
    }),
];

/// Explanation templates for the randomized no-match branch, 5 per verdict.
/// `{food}` is replaced with the submitted name (or "this food").
const YES_TEMPLATES: [&str; 5] = [
    "{food} looks like a nutritious choice that fits your goals.",
    "{food} appears wholesome — reasonable calories and useful nutrients.",
    "Based on typical preparations, {food} supports your plan well.",
    "{food} is generally a smart pick; enjoy a normal portion.",
    "Nothing concerning about {food} — it aligns with your profile.",
];

const NO_TEMPLATES: [&str; 5] = [
    "{food} is likely heavy in calories or sugar for your goals.",
    "Typical versions of {food} carry more fat and sodium than you want.",
    "{food} doesn't fit your current plan — consider an alternative.",
    "{food} tends to be energy-dense with little nutritional payoff.",
    "Better to skip {food} today given your profile.",
];

const OK_TEMPLATES: [&str; 5] = [
    "{food} is fine in moderation — keep the portion sensible.",
    "{food} can work occasionally; balance it with lighter meals.",
    "{food} is neither great nor terrible; portion size decides.",
    "An occasional serving of {food} won't derail your goals.",
    "{food} is acceptable — just don't make it a daily habit.",
];

/// Alternatives offered when the no-match branch lands on NO or OK.
const GENERIC_ALTERNATIVES: [&str; 8] = [
    "mixed green salad",
    "grilled chicken breast",
    "fresh fruit",
    "greek yogurt",
    "roasted vegetables",
    "a handful of nuts",
    "vegetable soup",
    "whole-grain toast",
];

/// Heuristic keyword-table analyzer with a seedable random no-match branch.
///
/// Synchronous and infallible — this is the last line of defense when the
/// AI analyzer is down, so it must always produce an answer.
pub struct FallbackTable {
    rng: Mutex<StdRng>,
}

impl FallbackTable {
    /// Create a table with an entropy-seeded random source.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Create a table with a fixed seed, for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Analyze a food name against the keyword table.
    ///
    /// First matching keyword wins; with no match, a plausible verdict is
    /// synthesized from the random source.
    pub fn analyze(&self, food_name: &str) -> AnalysisResult {
        let needle = food_name.trim().to_lowercase();

        if !needle.is_empty() {
            for (keyword, entry) in TABLE {
                if needle.contains(keyword) {
                    return Self::from_entry(food_name.trim(), entry);
                }
            }
        }

        self.synthesize(food_name.trim())
    }

    fn from_entry(food_name: &str, entry: &TableEntry) -> AnalysisResult {
        AnalysisResult {
            food_name: food_name.to_string(),
            verdict: entry.verdict,
            explanation: entry.explanation.to_string(),
            nutrition: NutritionFacts {
                calories: entry.calories,
                protein: entry.protein,
                carbs: entry.carbs,
                fat: entry.fat,
                fiber: entry.fiber,
                sugar: entry.sugar,
                sodium: entry.sodium,
            },
            confidence: entry.confidence,
            portion: entry.portion.to_string(),
            alternatives: entry.alternatives.iter().map(|s| s.to_string()).collect(),
            method: AnalysisMethod::Fallback,
        }
    }

    /// The no-match branch: uniform verdict, uniform template, macro values
    /// sampled in verdict-dependent ranges, carbs derived from the calorie
    /// identity `carbs = (calories - protein*4 - fat*9) / 4`, floored at 0.
    fn synthesize(&self, food_name: &str) -> AnalysisResult {
        // Lock held across a handful of integer samples only.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let verdict = Verdict::ALL[rng.random_range(0..Verdict::ALL.len())];
        let templates = match verdict {
            Verdict::Yes => &YES_TEMPLATES,
            Verdict::No => &NO_TEMPLATES,
            Verdict::Ok => &OK_TEMPLATES,
        };
        let template = templates[rng.random_range(0..templates.len())];

        let (calories, protein, fat, fiber, sugar, sodium) = match verdict {
            Verdict::Yes => (
                rng.random_range(50..=250u32),
                rng.random_range(2..=15u32),
                rng.random_range(0..=8u32),
                rng.random_range(1..=8u32),
                rng.random_range(2..=15u32),
                rng.random_range(0..=200u32),
            ),
            Verdict::Ok => (
                rng.random_range(150..=450u32),
                rng.random_range(5..=25u32),
                rng.random_range(5..=20u32),
                rng.random_range(0..=6u32),
                rng.random_range(5..=30u32),
                rng.random_range(100..=600u32),
            ),
            Verdict::No => (
                rng.random_range(200..=600u32),
                rng.random_range(2..=20u32),
                rng.random_range(10..=35u32),
                rng.random_range(0..=4u32),
                rng.random_range(20..=60u32),
                rng.random_range(300..=1200u32),
            ),
        };
        let carbs = derive_carbs(calories, protein, fat);

        let alternatives = if verdict == Verdict::Yes {
            Vec::new()
        } else {
            let start = rng.random_range(0..GENERIC_ALTERNATIVES.len());
            (0..3)
                .map(|i| GENERIC_ALTERNATIVES[(start + i) % GENERIC_ALTERNATIVES.len()].to_string())
                .collect()
        };
        let confidence = rng.random_range(CONFIDENCE_MIN..=90u8);

        let display_name = if food_name.is_empty() {
            "this food"
        } else {
            food_name
        };

        AnalysisResult {
            food_name: display_name.to_string(),
            verdict,
            explanation: template.replace("{food}", display_name),
            nutrition: NutritionFacts {
                calories,
                protein,
                carbs,
                fat,
                fiber,
                sugar,
                sodium,
            },
            confidence,
            portion: "1 serving".to_string(),
            alternatives,
            method: AnalysisMethod::Fallback,
        }
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Carbs from the macro/calorie identity, floored at zero.
fn derive_carbs(calories: u32, protein: u32, fat: u32) -> u32 {
    let remainder = i64::from(calories) - i64::from(protein) * 4 - i64::from(fat) * 9;
    (remainder / 4).max(0) as u32
}
