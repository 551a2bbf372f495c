//! Error Types

use thiserror::Error;

/// Result type alias for tutoring operations
pub type Result<T> = std::result::Result<T, TutorError>;

/// Tutoring service error types
#[derive(Error, Debug)]
pub enum TutorError {
    /// Gateway call failed (network, protocol, or parse failure)
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Gateway responded with an unexpected non-success status
    #[error("Gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// Upstream rate limiting (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Upstream quota exhausted (HTTP 402)
    #[error("Quota exhausted: {0}")]
    QuotaExhausted(String),

    /// Upstream API key not configured
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Gateway succeeded but returned no completion content
    #[error("Empty completion from gateway")]
    EmptyCompletion,

    /// Request named a tutoring mode outside the allowed set
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    /// Request topic was missing or blank after trimming
    #[error("Missing topic")]
    EmptyTopic,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl TutorError {
    /// Convert to a client-facing message
    pub fn user_message(&self) -> String {
        match self {
            TutorError::Gateway(msg) => msg.clone(),
            TutorError::GatewayUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            TutorError::RateLimited(_) => {
                "Too many requests right now. Please wait a moment and try again.".into()
            }
            TutorError::QuotaExhausted(_) => {
                "The AI helper has reached its usage limit. Please try again later.".into()
            }
            TutorError::MissingCredential(_) => "The AI helper is not configured.".into(),
            TutorError::EmptyCompletion => "No response from the AI service.".into(),
            TutorError::InvalidMode(_) => {
                "Mode must be one of: explain, practice, quiz".into()
            }
            TutorError::EmptyTopic => "Topic/input and mode are required".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for TutorError {
    fn from(err: anyhow::Error) -> Self {
        TutorError::Other(err.to_string())
    }
}
