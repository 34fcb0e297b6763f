//! Gemini generateContent client for food analysis.
//!
//! Talks to Google's Generative Language REST API. The prompt asks for a
//! strict JSON object; the response is parsed hard — any missing field,
//! non-JSON payload, or verdict outside {YES, NO, OK} is an error, never
//! a guess. See: <https://ai.google.dev/api/generate-content>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::FoodAnalyzer;
use crate::types::{
    AnalysisMethod, AnalysisRequest, AnalysisResult, NutritionFacts, UserProfile, Verdict,
    clamp_confidence,
};
use crate::{PlatecheckError, Result};

/// Default base URL for the Generative Language API
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used for analysis.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Client for the Gemini generateContent endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model (e.g. "gemini-1.5-pro").
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Run one analysis request against the API.
    async fn generate(
        &self,
        request: &AnalysisRequest,
        profile: &UserProfile,
    ) -> Result<AnalysisResult> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let mut parts = vec![Part::text(build_prompt(request, profile))];
        if let Some(image) = request.image_data.as_deref().filter(|d| !d.is_empty()) {
            parts.push(Part::inline_image(strip_data_url_prefix(image)));
        }

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest {
                contents: vec![Content { parts }],
            })
            .send()
            .await
            .map_err(|e| PlatecheckError::Http(e.to_string()))?;

        self.handle_response_errors(&response)?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| PlatecheckError::Http(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(PlatecheckError::EmptyResponse)?;

        parse_analysis_text(&text)
    }

    /// Check response status and map to appropriate error.
    fn handle_response_errors(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 | 403 => Err(PlatecheckError::AuthenticationFailed),
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(PlatecheckError::RateLimited { retry_after })
            }
            code => Err(PlatecheckError::Api {
                status: code,
                message: format!("Gemini API error: {}", status),
            }),
        }
    }
}

#[async_trait]
impl FoodAnalyzer for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze(
        &self,
        request: &AnalysisRequest,
        profile: &UserProfile,
    ) -> Result<AnalysisResult> {
        self.generate(request, profile).await
    }
}

/// Build the analysis prompt from the submission and profile.
fn build_prompt(request: &AnalysisRequest, profile: &UserProfile) -> String {
    let subject = match (&request.image_data, &request.food_name) {
        (Some(_), _) => "the food shown in the attached photo".to_string(),
        (None, Some(name)) => format!("the food \"{}\"", name.trim()),
        (None, None) => "the food".to_string(),
    };

    format!(
        "You are a nutrition assistant. Analyze {subject} for this user:\n\
         - health goals: {goals}\n\
         - dietary preferences: {prefs}\n\
         - allergies: {allergies}\n\
         - subscription tier: {tier}\n\
         \n\
         Respond with ONLY a JSON object, no prose, with exactly these \
         fields: food_name (string), verdict (\"YES\", \"NO\" or \"OK\"), \
         explanation (string), calories, protein, carbs, fat, fiber, \
         sugar, sodium (integers), confidence (integer 80-99), portion \
         (string), alternatives (array of strings, empty when the verdict \
         is YES).",
        goals = join_or_none(&profile.health_goals),
        prefs = join_or_none(&profile.dietary_preferences),
        allergies = join_or_none(&profile.allergies),
        tier = if profile.subscription_tier.is_empty() {
            "free"
        } else {
            &profile.subscription_tier
        },
    )
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Drop a `data:image/...;base64,` prefix if the caller sent a data URL.
fn strip_data_url_prefix(image: &str) -> &str {
    match image.split_once("base64,") {
        Some((head, tail)) if head.starts_with("data:") => tail,
        _ => image,
    }
}

/// Parse and sanitize the model's JSON answer.
///
/// Models routinely wrap JSON in markdown fences; those are stripped
/// before parsing. Everything else is strict: missing fields and unknown
/// verdicts are errors.
fn parse_analysis_text(text: &str) -> Result<AnalysisResult> {
    let stripped = strip_code_fences(text);
    let upstream: UpstreamAnalysis = serde_json::from_str(stripped)
        .map_err(|e| PlatecheckError::InvalidResponse(format!("bad analysis JSON: {e}")))?;

    let verdict = Verdict::parse(&upstream.verdict).ok_or_else(|| {
        PlatecheckError::InvalidResponse(format!("verdict \"{}\" not in YES/NO/OK", upstream.verdict))
    })?;

    // Alternatives make no sense on an approval; drop whatever came back.
    let alternatives = if verdict == Verdict::Yes {
        Vec::new()
    } else {
        upstream.alternatives.unwrap_or_default()
    };

    Ok(AnalysisResult {
        food_name: upstream.food_name,
        verdict,
        explanation: upstream.explanation,
        nutrition: NutritionFacts::from_raw(
            upstream.calories,
            upstream.protein,
            upstream.carbs,
            upstream.fat,
            upstream.fiber,
            upstream.sugar,
            upstream.sodium,
        ),
        confidence: clamp_confidence(upstream.confidence),
        portion: upstream.portion,
        alternatives,
        method: AnalysisMethod::Ai,
    })
}

/// Strip a leading/trailing markdown code fence (```json ... ```).
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip an optional language tag on the opening fence line.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inline_data", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline_image(data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: "image/jpeg".to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// The JSON shape the prompt demands. Every field except `alternatives`
/// is required; a missing field fails deserialization and the adapter.
#[derive(Deserialize)]
struct UpstreamAnalysis {
    food_name: String,
    verdict: String,
    explanation: String,
    calories: i64,
    protein: i64,
    carbs: i64,
    fat: i64,
    fiber: i64,
    sugar: i64,
    sodium: i64,
    confidence: i64,
    portion: String,
    alternatives: Option<Vec<String>>,
}
