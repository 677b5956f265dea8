//! Unified error types for sitesmoke

use thiserror::Error;

/// Unified error type for all harness operations
///
/// The first four variants are scenario-level failures: the runner catches
/// them at the scenario boundary and records them as that scenario's failure
/// reason. Anything escaping outside a scenario boundary is fatal to the run.
#[derive(Error, Debug)]
pub enum SmokeError {
    /// Browser session launch or teardown failed
    #[error("session error: {0}")]
    Session(String),

    /// A required element did not reach the requested state within the wait
    #[error("element not found: {locator} (waited {timeout_ms}ms)")]
    ElementNotFound { locator: String, timeout_ms: u64 },

    /// Rendered text or the page URL did not match the expected value
    #[error("content mismatch in {subject}: expected {expected:?}, got {actual:?}")]
    ContentMismatch {
        subject: String,
        expected: String,
        actual: String,
    },

    /// A triggered navigation did not settle within the wait
    #[error("navigation did not settle for {url}: {reason}")]
    Navigation { url: String, reason: String },

    // Harness-level errors
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SmokeError {
    /// Shorthand for a [`SmokeError::Session`] with a formatted message
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Shorthand for a [`SmokeError::Navigation`]
    pub fn navigation(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias using SmokeError
pub type Result<T> = std::result::Result<T, SmokeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_not_found_names_locator_and_timeout() {
        let err = SmokeError::ElementNotFound {
            locator: "nav .menu".to_string(),
            timeout_ms: 5000,
        };
        let msg = err.to_string();
        assert!(msg.contains("nav .menu"));
        assert!(msg.contains("5000ms"));
    }

    #[test]
    fn content_mismatch_surfaces_expected_and_actual() {
        let err = SmokeError::ContentMismatch {
            subject: "h1".to_string(),
            expected: "Introducing the New IDL Website".to_string(),
            actual: "Something else".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Introducing the New IDL Website"));
        assert!(msg.contains("Something else"));
    }
}
