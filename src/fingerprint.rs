//! Content + profile fingerprinting for the analysis cache.
//!
//! A fingerprint combines a *content digest* (what food was submitted)
//! with a *profile digest* (who asked, in personalization terms). Two
//! requests share a fingerprint only when both parts match, so a cached
//! verdict can never leak across differently-configured users — a change
//! in subscription tier, allergies, preferences, or goals produces a
//! different key even for identical food content.
//!
//! # Content digest
//!
//! Text submissions use the trimmed, lowercased food name. Image
//! submissions sample the base64 payload text at fixed offsets: the first
//! 100 bytes, three 50-byte interior windows at the 25%/50%/75% marks,
//! and the last 100 bytes. Sampling raw base64 means re-encoded copies of
//! the same pixels do not collide — a known-weak but deliberate scheme
//! (decoding pixels is out of scope). Offsets past the end of short
//! payloads produce empty windows rather than panicking.
//!
//! # Key representation
//!
//! The digest components are hashed into a `u64` with `DefaultHasher`
//! (SipHash), each component hashed as a distinct value so semantically
//! different inputs cannot collide by concatenation. The hash is
//! deterministic within a process lifetime, which is all an in-memory
//! cache needs.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::types::{AnalysisRequest, UserProfile};

/// Bytes sampled from the head and tail of an image payload.
const EDGE_SAMPLE_LEN: usize = 100;
/// Bytes sampled at each interior offset.
const WINDOW_SAMPLE_LEN: usize = 50;
/// Interior sample positions, as payload-length fractions.
const WINDOW_OFFSETS: [(usize, usize); 3] = [(1, 4), (2, 4), (3, 4)];

/// Cache key for an (analysis content, user profile) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// The raw key value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Compute the fingerprint for a request under a profile.
///
/// Pure and deterministic: identical inputs always yield identical keys.
/// Returns `None` when the request carries no usable content (no image
/// and no non-whitespace food name) — such requests must not be cached.
/// Image data takes precedence over a food name when both are present.
pub fn fingerprint(request: &AnalysisRequest, profile: &UserProfile) -> Option<Fingerprint> {
    let mut hasher = DefaultHasher::new();

    match request.image_data.as_deref().filter(|d| !d.is_empty()) {
        Some(image) => {
            "image".hash(&mut hasher);
            hash_image_sample(image, &mut hasher);
        }
        None => {
            let name = request.food_name.as_deref()?.trim().to_lowercase();
            if name.is_empty() {
                return None;
            }
            "name".hash(&mut hasher);
            name.hash(&mut hasher);
        }
    }

    hash_profile(profile, &mut hasher);
    Some(Fingerprint(hasher.finish()))
}

/// Hash the multi-offset sample of a base64 image payload.
///
/// Each window is hashed as a distinct component; out-of-range windows
/// degrade to empty slices.
fn hash_image_sample(image: &str, hasher: &mut DefaultHasher) {
    let bytes = image.as_bytes();
    let len = bytes.len();

    sample(bytes, 0, EDGE_SAMPLE_LEN).hash(hasher);
    for (num, den) in WINDOW_OFFSETS {
        sample(bytes, len * num / den, WINDOW_SAMPLE_LEN).hash(hasher);
    }
    sample(bytes, len.saturating_sub(EDGE_SAMPLE_LEN), EDGE_SAMPLE_LEN).hash(hasher);
    len.hash(hasher);
}

/// Slice `count` bytes starting at `start`, saturating at the end.
fn sample(bytes: &[u8], start: usize, count: usize) -> &[u8] {
    let start = start.min(bytes.len());
    let end = (start + count).min(bytes.len());
    &bytes[start..end]
}

/// Hash the personalization context.
///
/// List fields are sorted first so ordering differences in the caller's
/// representation do not split the cache.
fn hash_profile(profile: &UserProfile, hasher: &mut DefaultHasher) {
    hash_sorted(&profile.health_goals, hasher);
    hash_sorted(&profile.dietary_preferences, hasher);
    hash_sorted(&profile.allergies, hasher);
    profile.subscription_tier.hash(hasher);
}

fn hash_sorted(items: &[String], hasher: &mut DefaultHasher) {
    let mut sorted: Vec<&str> = items.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.hash(hasher);
}
