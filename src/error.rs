//! Platecheck error types

use std::time::Duration;

/// Platecheck error types
#[derive(Debug, thiserror::Error)]
pub enum PlatecheckError {
    // Analyzer/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    /// Upstream returned a payload that cannot be used: non-JSON text,
    /// a missing required field, or a verdict outside the allowed set.
    /// The adapter never repairs these — the engine falls back instead.
    #[error("invalid analyzer response: {0}")]
    InvalidResponse(String),

    #[error("empty response from analyzer")]
    EmptyResponse,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither a food name nor image data was supplied. This is a caller
    /// contract violation and is rejected before any analysis work.
    #[error("missing input: provide a food name or image data")]
    MissingInput,

    /// The user already has an in-flight analysis on this endpoint.
    /// Retryable — callers should retry after the suggested delay.
    #[error("analysis already in progress, retry after {retry_after:?}")]
    AdmissionConflict { retry_after: Duration },

    // Configuration errors
    #[error("no analyzer configured")]
    NoAnalyzer,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl PlatecheckError {
    /// Suggested retry delay, for errors that carry one.
    ///
    /// `Some` for [`AdmissionConflict`](Self::AdmissionConflict) and for
    /// [`RateLimited`](Self::RateLimited) when upstream supplied a hint.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::AdmissionConflict { retry_after } => Some(*retry_after),
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Whether the caller can usefully retry this request as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::AdmissionConflict { .. } | Self::RateLimited { .. }
        )
    }
}

/// Result type alias for Platecheck operations
pub type Result<T> = std::result::Result<T, PlatecheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission_conflict_is_retryable() {
        let err = PlatecheckError::AdmissionConflict {
            retry_after: Duration::from_secs(5),
        };
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn missing_input_is_not_retryable() {
        assert!(!PlatecheckError::MissingInput.is_retryable());
        assert_eq!(PlatecheckError::MissingInput.retry_after(), None);
    }

    #[test]
    fn rate_limited_without_hint() {
        let err = PlatecheckError::RateLimited { retry_after: None };
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), None);
    }
}
