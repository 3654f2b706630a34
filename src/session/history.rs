//! Bounded history of successful predictions within one session

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

use crate::prediction::PredictionResult;

/// Maximum number of predictions kept in history
pub const MAX_HISTORY_SIZE: usize = 100;

/// One successful prediction
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub text: String,
    pub result: PredictionResult,
    pub duration_ms: u64,
    pub analyzed_at: DateTime<Utc>,
}

/// FIFO history, oldest entries evicted first
#[derive(Debug, Clone, Default)]
pub struct PredictionHistory {
    entries: VecDeque<HistoryEntry>,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= MAX_HISTORY_SIZE {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Most recent entries first
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
