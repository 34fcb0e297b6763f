//! The analysis verdict.
//!
//! Every analysis resolves to one of three verdicts: the food fits the
//! user's goals (`Yes`), conflicts with them (`No`), or is acceptable in
//! moderation (`Ok`). The wire form is the uppercase word.

use serde::{Deserialize, Serialize};

/// Verdict assigned to an analyzed food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Good fit for the user's goals.
    Yes,
    /// Conflicts with the user's goals.
    No,
    /// Acceptable in moderation.
    Ok,
}

impl Verdict {
    /// All verdicts, in a fixed order (used by the fallback's random pick).
    pub const ALL: [Verdict; 3] = [Verdict::Yes, Verdict::No, Verdict::Ok];

    /// Parse an upstream verdict string.
    ///
    /// Tolerates surrounding whitespace and any letter case; anything
    /// outside {YES, NO, OK} is `None` — upstream values are never
    /// coerced into a verdict.
    pub fn parse(s: &str) -> Option<Verdict> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YES" => Some(Verdict::Yes),
            "NO" => Some(Verdict::No),
            "OK" => Some(Verdict::Ok),
            _ => None,
        }
    }

    /// The wire form of this verdict.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Yes => "YES",
            Verdict::No => "NO",
            Verdict::Ok => "OK",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
