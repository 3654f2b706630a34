//! Render model for the result panel
//!
//! Pure data derived from a `UiState` snapshot; terminal drawing lives in the
//! REPL display manager.

use crate::prediction::PredictionLabel;
use crate::session::UiState;

/// Width of the confidence bar in cells
pub const CONFIDENCE_BAR_WIDTH: usize = 20;

/// Everything needed to draw one committed prediction
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub label: PredictionLabel,
    pub headline: &'static str,
    pub confidence: String,
    pub bar_filled: usize,
    pub description: &'static str,
    pub analyzed_text: String,
}

impl ResultView {
    /// `None` when the session has no result
    pub fn from_state(state: &UiState) -> Option<Self> {
        let shown = state.result.as_ref()?;
        let label = shown.result.label;
        let filled = (shown.result.confidence * CONFIDENCE_BAR_WIDTH as f64).round() as usize;

        Some(Self {
            label,
            headline: label.headline(),
            confidence: shown.result.confidence_display(),
            bar_filled: filled.min(CONFIDENCE_BAR_WIDTH),
            description: label.description(),
            analyzed_text: shown.input_text.clone(),
        })
    }

    /// Confidence bar as text, e.g. `[##########----------]`
    pub fn bar(&self) -> String {
        format!(
            "[{}{}]",
            "#".repeat(self.bar_filled),
            "-".repeat(CONFIDENCE_BAR_WIDTH - self.bar_filled)
        )
    }
}

/// Sidebar-style API status line
pub fn api_status_line(available: bool) -> &'static str {
    if available {
        "API Status: Connected"
    } else {
        "API Status: Not Connected"
    }
}

/// Status line from the cached health answer, without probing
pub fn cached_status_line(available: Option<bool>) -> &'static str {
    match available {
        Some(available) => api_status_line(available),
        None => "API Status: Not Checked",
    }
}
