//! User personalization context.
//!
//! The profile participates in the analysis fingerprint: the same food
//! submitted under a different tier, allergy set, preference set, or goal
//! set must never share a cached verdict.

use serde::{Deserialize, Serialize};

/// Personalization context for an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Health goals (e.g. "weight_loss", "muscle_gain").
    pub health_goals: Vec<String>,
    /// Dietary preferences (e.g. "vegetarian", "low_carb").
    pub dietary_preferences: Vec<String>,
    /// Declared allergies (e.g. "peanuts").
    pub allergies: Vec<String>,
    /// Subscription tier string (e.g. "free", "premium").
    pub subscription_tier: String,
}

impl UserProfile {
    /// Create a profile with the given subscription tier and no lists.
    pub fn new(subscription_tier: impl Into<String>) -> Self {
        Self {
            subscription_tier: subscription_tier.into(),
            ..Self::default()
        }
    }

    /// Set the health goals.
    pub fn health_goals<I, S>(mut self, goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.health_goals = goals.into_iter().map(Into::into).collect();
        self
    }

    /// Set the dietary preferences.
    pub fn dietary_preferences<I, S>(mut self, prefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dietary_preferences = prefs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the allergies.
    pub fn allergies<I, S>(mut self, allergies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergies = allergies.into_iter().map(Into::into).collect();
        self
    }
}
