//! Session-scoped UI state
//!
//! Each session owns one `SessionState`. The orchestrator writes to it, the
//! renderer reads snapshots of it, and nothing is shared between sessions.
//! The result slot and its source text are written together under one lock.

pub mod history;

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::prediction::{InputText, PredictionResult};

pub use history::{HistoryEntry, PredictionHistory, MAX_HISTORY_SIZE};

/// A committed prediction together with the text it was made for
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedResult {
    pub result: PredictionResult,
    pub input_text: String,
    pub analyzed_at: DateTime<Utc>,
}

/// What the renderer draws
///
/// `result` is replaced only by a new success or by `clear()`; `error` holds
/// the message of the latest failed submission and is dropped on success.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub result: Option<DisplayedResult>,
    pub error: Option<String>,
}

impl UiState {
    pub fn is_empty(&self) -> bool {
        self.result.is_none() && self.error.is_none()
    }
}

/// Counters for `/status`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub submissions: usize,
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, Default)]
struct SessionInner {
    ui: UiState,
    history: PredictionHistory,
    stats: SessionStats,
}

/// Shared handle to one session's state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    inner: Arc<Mutex<SessionInner>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        // A panic mid-write cannot leave a half-written result: every write
        // below replaces whole values.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the current UI state
    pub fn snapshot(&self) -> UiState {
        self.lock().ui.clone()
    }

    /// Store a successful prediction and its text in one step
    pub fn commit_success(&self, text: &InputText, result: PredictionResult, duration_ms: u64) {
        let analyzed_at = Utc::now();
        let mut inner = self.lock();

        inner.ui = UiState {
            result: Some(DisplayedResult {
                result,
                input_text: text.as_str().to_string(),
                analyzed_at,
            }),
            error: None,
        };
        inner.history.record(HistoryEntry {
            text: text.as_str().to_string(),
            result,
            duration_ms,
            analyzed_at,
        });
        inner.stats.submissions += 1;
        inner.stats.succeeded += 1;
    }

    /// Surface a failure message, leaving any displayed result in place
    pub fn record_error(&self, message: String) {
        let mut inner = self.lock();
        inner.ui.error = Some(message);
        inner.stats.submissions += 1;
        inner.stats.failed += 1;
    }

    /// Reset UI state and history
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.ui = UiState::default();
        inner.history.clear();
    }

    pub fn history(&self, limit: usize) -> Vec<HistoryEntry> {
        self.lock().history.recent(limit)
    }

    pub fn stats(&self) -> SessionStats {
        self.lock().stats
    }
}
