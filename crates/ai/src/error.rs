//! Chat assistant error types.

use thiserror::Error;

/// Chat assistant errors.
///
/// Only hard failures end up here; errors reported by the model provider are
/// turned into a friendly reply instead.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key configured; holds the variable name.
    #[error("Missing {0}")]
    MissingApiKey(String),

    /// The provider could not be reached or returned an unreadable body.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl AiError {
    /// Create a new provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}

/// Error code for programmatic handling.
impl AiError {
    pub fn code(&self) -> &'static str {
        match self {
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::Provider(_) => "PROVIDER_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message() {
        let err = AiError::MissingApiKey("GEMINI_API_KEY".to_string());
        assert_eq!(err.to_string(), "Missing GEMINI_API_KEY");
        assert_eq!(err.code(), "MISSING_API_KEY");
    }

    #[test]
    fn test_provider_helper() {
        let err = AiError::provider("down");
        assert!(matches!(&err, AiError::Provider(m) if m == "down"));
        assert_eq!(err.code(), "PROVIDER_ERROR");
    }
}
