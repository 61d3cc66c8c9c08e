use thiserror::Error;

/// Error taxonomy for the extraction core.
///
/// An empty result is never an error: flows return empty collections for
/// legitimately-empty replies, and this enum only covers hard failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Raw caller input failed validation; no backend call was made.
    #[error("{0}")]
    InvalidInput(String),

    /// A required credential or environment value is missing. The message is
    /// surfaced verbatim to the caller.
    #[error("{0}")]
    Configuration(String),

    /// Transport-level failure talking to an external collaborator.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The external service answered with a non-success status.
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend replied, but the payload does not conform to the expected
    /// output schema.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// Serializing our own data for prompt embedding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A template referenced a variable the caller never supplied.
    #[error("prompt error: {0}")]
    Prompt(String),
}

impl Error {
    /// Whether the error message is safe to show to the caller as-is.
    ///
    /// Validation and configuration messages pass through; transport and
    /// schema failures collapse to a generic message at the dispatch boundary,
    /// with full detail reserved for operator diagnostics.
    pub fn is_caller_visible(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message_is_verbatim() {
        let err = Error::Configuration(
            "SERPAPI_API_KEY environment variable is not set.".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "SERPAPI_API_KEY environment variable is not set."
        );
        assert!(err.is_caller_visible());
    }

    #[test]
    fn test_hard_failures_are_not_caller_visible() {
        assert!(!Error::Backend("HTTP 500".to_string()).is_caller_visible());
        assert!(!Error::SchemaViolation("missing field".to_string()).is_caller_visible());
    }
}
