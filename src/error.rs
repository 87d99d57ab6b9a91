//! The error taxonomy for one generation attempt.
//!
//! Every failure a request can hit on its way to the provider maps onto one
//! variant, so the UI can render a single `Error: …` line without parsing
//! exceptions. Config-file parse failures are not here: they surface as
//! `serde_json::Error` straight from [`crate::agents::AgentConfig`].

use thiserror::Error;

/// What went wrong while assembling or executing a model request.
#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    /// A required access credential is missing from the environment.
    #[error("missing credential: {0}")]
    Configuration(String),

    /// The request carries nothing to process.
    #[error("nothing to process: {0}")]
    Validation(String),

    /// The attachment could not be read from disk.
    #[error("attachment unreadable: {0}")]
    Io(String),

    /// The provider rejected or failed the call; the message carries the
    /// provider's response verbatim. Covers network failures, quota, bad
    /// model names, and malformed responses alike.
    #[error("{provider} error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_preserves_the_body_verbatim() {
        let err = GenerateError::Provider {
            provider: "gemini",
            message: "429: {\"error\":{\"message\":\"quota exceeded\"}}".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("429"));
        assert!(rendered.contains("quota exceeded"));
    }

    #[test]
    fn configuration_error_names_the_missing_key() {
        let err = GenerateError::Configuration("GEMINI_API_KEY".to_string());
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
