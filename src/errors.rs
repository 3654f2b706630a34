//! Error types for the sarcasm detector
//!
//! Two layers: `AppError` covers setup concerns (configuration files, the
//! backend URL, building the HTTP client), `PredictionError` is the taxonomy of a single prediction
//! cycle. Prediction errors never escape the orchestrator as failures; they are
//! turned into user-facing messages and stored in the session.

use thiserror::Error;

/// Setup and infrastructure errors
#[derive(Error, Debug)]
pub enum AppError {
    /// State machine transition errors
    #[error("Invalid state transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid backend URL
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Everything that can go wrong while turning text into a verdict
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// Nothing left after trimming whitespace
    #[error("input is empty")]
    EmptyInput,

    /// More characters than the backend accepts
    #[error("input has {len} characters, maximum is {max}")]
    TooLong { len: usize, max: usize },

    /// Health probe failed, no prediction was attempted
    #[error("backend at {url} is unreachable")]
    BackendUnreachable { url: String },

    /// Transport failure while calling /predict
    #[error("connection to {url} failed: {reason}")]
    ConnectionError { url: String, reason: String },

    /// /predict did not answer within its budget
    #[error("prediction timed out after {duration_ms}ms")]
    TimeoutError { duration_ms: u64 },

    /// /predict answered with a non-success status
    #[error("backend returned HTTP {status}")]
    BackendError { status: u16 },

    /// /predict answered 2xx but the body did not match the contract
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

impl PredictionError {
    /// Short message shown to the user in place of a result
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::EmptyInput => "Please enter some text to analyze!".to_string(),
            PredictionError::TooLong { max, .. } => {
                format!("Text is too long! Maximum {} characters allowed.", max)
            }
            PredictionError::BackendUnreachable { url } => format!(
                "Cannot connect to API server. Please make sure the backend is running on {}",
                url
            ),
            PredictionError::ConnectionError { url, .. } => format!(
                "Cannot reach the API server. Please ensure the backend is running on {}",
                url
            ),
            PredictionError::TimeoutError { .. } => {
                "Request timeout. Please try again.".to_string()
            }
            PredictionError::BackendError { status } => format!("API Error: {}", status),
            PredictionError::MalformedResponse(reason) => {
                format!("Unexpected response from API server: {}", reason)
            }
        }
    }

    /// Input errors are decided locally, before any network traffic
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PredictionError::EmptyInput | PredictionError::TooLong { .. }
        )
    }
}
