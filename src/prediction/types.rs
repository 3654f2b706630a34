//! Prediction domain types
//!
//! `InputText` can only be built through validation, so holding one proves
//! the text is non-blank and within the character limit.

use std::fmt;
use std::time::Duration;

use crate::errors::PredictionError;

/// Maximum characters accepted by the backend
pub const MAX_INPUT_CHARS: usize = 1000;

/// Default prediction budget (30 seconds)
pub const DEFAULT_PREDICT_TIMEOUT: Duration = Duration::from_secs(30);

/// Example shown as a hint to the user
pub const EXAMPLE_INPUT: &str = "Ya, tentu saja, saya sangat senang dengan cuaca hujan hari ini!";

/// Validated user text, kept exactly as submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputText(String);

impl InputText {
    /// Validate raw text against the blank and length rules
    ///
    /// Length is counted in characters on the untrimmed text.
    pub fn parse(raw: &str, max_chars: usize) -> Result<Self, PredictionError> {
        if raw.trim().is_empty() {
            return Err(PredictionError::EmptyInput);
        }

        let len = raw.chars().count();
        if len > max_chars {
            return Err(PredictionError::TooLong { len, max: max_chars });
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for InputText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One call to `/predict`
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    pub text: InputText,
    pub timeout: Duration,
}

impl PredictionRequest {
    pub fn new(text: InputText) -> Self {
        Self::with_timeout(text, DEFAULT_PREDICT_TIMEOUT)
    }

    pub fn with_timeout(text: InputText, timeout: Duration) -> Self {
        Self { text, timeout }
    }
}

/// Verdict reported by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionLabel {
    Sarcasm,
    NonSarcasm,
}

impl PredictionLabel {
    /// The backend reports `"Sarcasm"`; any other value means non-sarcasm
    pub fn from_wire(value: &str) -> Self {
        if value == "Sarcasm" {
            PredictionLabel::Sarcasm
        } else {
            PredictionLabel::NonSarcasm
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionLabel::Sarcasm => "Sarcasm",
            PredictionLabel::NonSarcasm => "Non-Sarcasm",
        }
    }

    /// Headline for the result panel
    pub fn headline(&self) -> &'static str {
        match self {
            PredictionLabel::Sarcasm => "Sarcasm Detected",
            PredictionLabel::NonSarcasm => "Non-Sarcasm",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PredictionLabel::Sarcasm => "The text is likely sarcastic.",
            PredictionLabel::NonSarcasm => "The text is likely not sarcastic.",
        }
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus confidence in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub label: PredictionLabel,
    pub confidence: f64,
}

impl PredictionResult {
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }

    /// Confidence as a percentage with one decimal, e.g. `"87.0%"`
    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.confidence_percent())
    }
}
