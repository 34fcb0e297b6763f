//! Wiremock integration tests for GeminiClient.
//!
//! These tests verify correct HTTP interaction and error handling using mocked responses.

use platecheck::analyzers::{FoodAnalyzer, GeminiClient};
use platecheck::{AnalysisMethod, AnalysisRequest, PlatecheckError, UserProfile, Verdict};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANALYSIS_JSON: &str = r#"{
    "food_name": "apple", "verdict": "YES", "explanation": "whole fruit",
    "calories": 95, "protein": 0, "carbs": 25, "fat": 0,
    "fiber": 4, "sugar": 19, "sodium": 2,
    "confidence": 92, "portion": "1 medium apple", "alternatives": []
}"#;

/// Wrap analysis text in the generateContent response envelope.
fn gemini_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
}

fn profile() -> UserProfile {
    UserProfile::new("free").health_goals(["weight_loss"])
}

/// Test successful analysis of a named food.
#[tokio::test]
async fn test_analyze_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(ANALYSIS_JSON)))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri());
    let result = client
        .analyze(&AnalysisRequest::food("apple"), &profile())
        .await
        .expect("analyze should succeed");

    assert_eq!(result.food_name, "apple");
    assert_eq!(result.verdict, Verdict::Yes);
    assert_eq!(result.nutrition.calories, 95);
    assert_eq!(result.confidence, 92);
    assert_eq!(result.method, AnalysisMethod::Ai);
}

/// Test that a custom model name lands in the request path.
#[tokio::test]
async fn test_custom_model_in_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(ANALYSIS_JSON)))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri()).model("gemini-1.5-pro");
    let result = client
        .analyze(&AnalysisRequest::food("apple"), &profile())
        .await;

    assert!(result.is_ok());
}

/// Test that image submissions attach an inline_data part with the data-URL
/// prefix stripped.
#[tokio::test]
async fn test_image_sent_as_inline_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{
                "parts": [
                    {},
                    { "inline_data": { "mime_type": "image/jpeg", "data": "AAAA" } }
                ]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(ANALYSIS_JSON)))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri());
    let request = AnalysisRequest::image("data:image/jpeg;base64,AAAA");
    let result = client.analyze(&request, &profile()).await;

    assert!(result.is_ok());
}

/// Test that markdown-fenced JSON still parses.
#[tokio::test]
async fn test_fenced_json_parses() {
    let mock_server = MockServer::start().await;
    let fenced = format!("```json\n{ANALYSIS_JSON}\n```");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(&fenced)))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri());
    let result = client
        .analyze(&AnalysisRequest::food("apple"), &profile())
        .await
        .expect("fenced JSON should parse");

    assert_eq!(result.food_name, "apple");
}

/// Test that out-of-range numeric fields come back clamped, not rejected.
#[tokio::test]
async fn test_wild_numbers_are_clamped() {
    let mock_server = MockServer::start().await;
    let wild = ANALYSIS_JSON
        .replace("\"calories\": 95", "\"calories\": 250000")
        .replace("\"protein\": 0", "\"protein\": -5")
        .replace("\"confidence\": 92", "\"confidence\": 300");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(&wild)))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri());
    let result = client
        .analyze(&AnalysisRequest::food("mystery"), &profile())
        .await
        .expect("clamping should sanitize, not fail");

    assert_eq!(result.nutrition.calories, 10_000);
    assert_eq!(result.nutrition.protein, 0);
    assert_eq!(result.confidence, 99);
}

/// Test that a verdict outside YES/NO/OK is a hard failure.
#[tokio::test]
async fn test_unknown_verdict_is_invalid_response() {
    let mock_server = MockServer::start().await;
    let bad = ANALYSIS_JSON.replace("\"YES\"", "\"MAYBE\"");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(&bad)))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri());
    let err = client
        .analyze(&AnalysisRequest::food("apple"), &profile())
        .await
        .unwrap_err();

    assert!(matches!(err, PlatecheckError::InvalidResponse(_)));
}

/// Test that a missing required field is a hard failure.
#[tokio::test]
async fn test_missing_field_is_invalid_response() {
    let mock_server = MockServer::start().await;
    let bad = ANALYSIS_JSON.replace("\"portion\": \"1 medium apple\",", "");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(&bad)))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri());
    let err = client
        .analyze(&AnalysisRequest::food("apple"), &profile())
        .await
        .unwrap_err();

    assert!(matches!(err, PlatecheckError::InvalidResponse(_)));
}

/// Test that conversational prose instead of JSON is a hard failure.
#[tokio::test]
async fn test_prose_response_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_body("Sure! An apple is a healthy choice.")),
        )
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri());
    let err = client
        .analyze(&AnalysisRequest::food("apple"), &profile())
        .await
        .unwrap_err();

    assert!(matches!(err, PlatecheckError::InvalidResponse(_)));
}

/// Test that a response with no candidates maps to EmptyResponse.
#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri());
    let err = client
        .analyze(&AnalysisRequest::food("apple"), &profile())
        .await
        .unwrap_err();

    assert!(matches!(err, PlatecheckError::EmptyResponse));
}

/// Test 401 Unauthorized returns AuthenticationFailed error.
#[tokio::test]
async fn test_error_401_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("bad_key", mock_server.uri());
    let err = client
        .analyze(&AnalysisRequest::food("apple"), &profile())
        .await
        .unwrap_err();

    assert!(matches!(err, PlatecheckError::AuthenticationFailed));
}

/// Test 429 returns RateLimited with the retry-after header parsed.
#[tokio::test]
async fn test_error_429_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri());
    let err = client
        .analyze(&AnalysisRequest::food("apple"), &profile())
        .await
        .unwrap_err();

    match err {
        PlatecheckError::RateLimited { retry_after } => {
            assert_eq!(retry_after, Some(std::time::Duration::from_secs(30)));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

/// Test 500 returns a generic Api error carrying the status code.
#[tokio::test]
async fn test_error_500_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("test_key", mock_server.uri());
    let err = client
        .analyze(&AnalysisRequest::food("apple"), &profile())
        .await
        .unwrap_err();

    match err {
        PlatecheckError::Api { status, .. } => assert_eq!(status, 500),
        other => panic!("expected Api error, got {other:?}"),
    }
}
