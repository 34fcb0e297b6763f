//! Tests for fingerprint determinism and profile sensitivity.

use platecheck::{AnalysisRequest, UserProfile, fingerprint};

fn base_profile() -> UserProfile {
    UserProfile::new("free")
        .health_goals(["weight_loss", "more_protein"])
        .dietary_preferences(["vegetarian"])
        .allergies(["peanuts"])
}

// =========================================================================
// Determinism
// =========================================================================

#[test]
fn identical_inputs_yield_identical_fingerprints() {
    let request = AnalysisRequest::food("grilled chicken salad");
    let profile = base_profile();

    let a = fingerprint(&request, &profile).unwrap();
    let b = fingerprint(&request, &profile).unwrap();
    assert_eq!(a, b);
}

#[test]
fn image_fingerprint_is_deterministic() {
    // Long enough that every sampling window lands inside the payload
    let payload = "QUJDREVGRw==".repeat(200);
    let request = AnalysisRequest::image(payload);
    let profile = base_profile();

    assert_eq!(
        fingerprint(&request, &profile),
        fingerprint(&request, &profile)
    );
}

// =========================================================================
// Profile sensitivity — every personalization field must split the key
// =========================================================================

#[test]
fn subscription_tier_changes_the_fingerprint() {
    let request = AnalysisRequest::food("apple");
    let free = base_profile();
    let mut premium = base_profile();
    premium.subscription_tier = "premium".into();

    assert_ne!(
        fingerprint(&request, &free),
        fingerprint(&request, &premium)
    );
}

#[test]
fn allergy_set_changes_the_fingerprint() {
    let request = AnalysisRequest::food("apple");
    let a = base_profile();
    let b = base_profile().allergies(["peanuts", "shellfish"]);

    assert_ne!(fingerprint(&request, &a), fingerprint(&request, &b));
}

#[test]
fn dietary_preferences_change_the_fingerprint() {
    let request = AnalysisRequest::food("apple");
    let a = base_profile();
    let b = base_profile().dietary_preferences(["vegan"]);

    assert_ne!(fingerprint(&request, &a), fingerprint(&request, &b));
}

#[test]
fn health_goals_change_the_fingerprint() {
    let request = AnalysisRequest::food("apple");
    let a = base_profile();
    let b = base_profile().health_goals(["maintenance"]);

    assert_ne!(fingerprint(&request, &a), fingerprint(&request, &b));
}

#[test]
fn personalization_does_not_leak_across_profiles() {
    // Same food, two differently-configured users: keys must differ even
    // though the content digests are identical.
    let request = AnalysisRequest::food("protein bar");
    let a = UserProfile::new("free");
    let b = UserProfile::new("premium");

    assert_ne!(fingerprint(&request, &a), fingerprint(&request, &b));
}

// =========================================================================
// Content digest behavior
// =========================================================================

#[test]
fn different_food_names_yield_different_fingerprints() {
    let profile = base_profile();
    assert_ne!(
        fingerprint(&AnalysisRequest::food("apple"), &profile),
        fingerprint(&AnalysisRequest::food("banana"), &profile)
    );
}

#[test]
fn name_normalization_collapses_case_and_whitespace() {
    let profile = base_profile();
    assert_eq!(
        fingerprint(&AnalysisRequest::food("  GRILLED Chicken "), &profile),
        fingerprint(&AnalysisRequest::food("grilled chicken"), &profile)
    );
}

#[test]
fn images_differing_only_in_the_middle_still_differ() {
    let profile = base_profile();
    let mut a = "A".repeat(2000);
    let b = a.clone();
    // Flip bytes at the 50% sampling window
    a.replace_range(1000..1010, "XXXXXXXXXX");

    assert_ne!(
        fingerprint(&AnalysisRequest::image(a), &profile),
        fingerprint(&AnalysisRequest::image(b), &profile)
    );
}

#[test]
fn tiny_image_payloads_fingerprint_without_panicking() {
    let profile = base_profile();
    for len in 0..10 {
        let request = AnalysisRequest::image("x".repeat(len));
        // Empty payload has no content; everything else fingerprints
        assert_eq!(fingerprint(&request, &profile).is_some(), len > 0);
    }
}

#[test]
fn empty_request_yields_no_fingerprint() {
    let profile = base_profile();
    assert!(fingerprint(&AnalysisRequest::default(), &profile).is_none());
    assert!(fingerprint(&AnalysisRequest::food("   \t"), &profile).is_none());
}
