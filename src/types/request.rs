//! The inbound analysis request.

use serde::{Deserialize, Serialize};

/// What the user submitted for analysis: a food name, a base64 image, or
/// both. When both are present the image takes precedence — submitting a
/// photo signals intent to analyze the photo.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Free-text food description (e.g. "grilled chicken salad").
    pub food_name: Option<String>,
    /// Base64-encoded image payload, optionally with a `data:` URL prefix.
    pub image_data: Option<String>,
}

impl AnalysisRequest {
    /// Request analysis of a named food.
    pub fn food(name: impl Into<String>) -> Self {
        Self {
            food_name: Some(name.into()),
            image_data: None,
        }
    }

    /// Request analysis of a base64-encoded image.
    pub fn image(data: impl Into<String>) -> Self {
        Self {
            food_name: None,
            image_data: Some(data.into()),
        }
    }

    /// Whether the request carries no usable content.
    ///
    /// A whitespace-only food name and an empty image payload both count
    /// as missing.
    pub fn is_empty(&self) -> bool {
        let has_name = self
            .food_name
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty());
        let has_image = self.image_data.as_deref().is_some_and(|d| !d.is_empty());
        !has_name && !has_image
    }
}
