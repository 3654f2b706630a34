//! Display manager for terminal output
//!
//! Draws the result panel, errors and the "Analyzing text..." spinner. Used by
//! both the REPL and one-shot mode.

use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

use crate::health::HealthStatus;
use crate::prediction::{PredictionLabel, SubmitOutcome};
use crate::session::{HistoryEntry, SessionStats, UiState};
use crate::view::{api_status_line, cached_status_line, ResultView};

/// Terminal renderer
pub struct DisplayManager {
    show_progress: bool,
    tick_interval: Duration,
}

impl DisplayManager {
    /// Create new display manager
    pub fn new() -> Self {
        Self::with_progress(true)
    }

    /// Display manager with the spinner optionally disabled
    pub fn with_progress(show_progress: bool) -> Self {
        DisplayManager {
            show_progress,
            tick_interval: Duration::from_millis(100),
        }
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, location: &str, available: bool) {
        let width = 64;
        let rule = "=".repeat(width);

        println!("\n{}", rule.cyan());
        println!("{}", format!("  Sarcasm Detector {}", version).bold().cyan());
        println!("{}", "  Detect sarcasm in Indonesian text".dimmed());
        println!(
            "{}",
            format!("  Backend: {} | {}", location, api_status_line(available)).dimmed()
        );
        println!("{}\n", rule.cyan());
        println!(
            "Type Indonesian text to analyze (max 1000 characters), {} for commands, {} to quit\n",
            "/help".green(),
            "/exit".green()
        );
    }

    /// Spinner shown while a prediction is in flight
    pub fn start_analyzing(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Analyzing text...");
        pb.enable_steady_tick(self.tick_interval);
        Some(pb)
    }

    /// Render the outcome of a submission against the session state
    pub fn show_outcome(&self, outcome: &SubmitOutcome, state: &UiState) {
        match outcome {
            SubmitOutcome::Succeeded(_) => {
                if let Some(view) = ResultView::from_state(state) {
                    self.show_result(&view);
                }
            }
            SubmitOutcome::Failed(err) => {
                let Some(message) = &state.error else {
                    return;
                };
                if err.is_input_error() {
                    self.show_warning(message);
                } else {
                    self.show_error(message);
                }
            }
            SubmitOutcome::Rejected => {
                self.show_warning("A prediction is already in progress.");
            }
        }
    }

    /// Draw the result panel
    pub fn show_result(&self, view: &ResultView) {
        let headline = match view.label {
            PredictionLabel::Sarcasm => view.headline.magenta().bold(),
            PredictionLabel::NonSarcasm => view.headline.green().bold(),
        };

        println!();
        self.show_section("Result");
        println!("  {}", headline);
        println!("  Confidence: {}", view.confidence.bold());
        println!("  {}", view.bar().cyan());
        println!("  {}", view.description.dimmed());

        self.show_section("Analyzed Text");
        println!("  {}", view.analyzed_text.italic());
        println!();
    }

    /// Show backend reachability
    pub fn show_health(&self, location: &str, available: bool) {
        let status = if available {
            api_status_line(true).green()
        } else {
            api_status_line(false).red()
        };
        println!("{} ({})", status, location.dimmed());
    }

    /// Show recent predictions
    pub fn show_history(&self, entries: &[HistoryEntry]) {
        if entries.is_empty() {
            println!("{}", "No predictions in history yet.".yellow());
            return;
        }

        self.show_section("History");
        for (i, entry) in entries.iter().enumerate() {
            println!(
                "  {}. {} {} {}",
                (i + 1).to_string().cyan(),
                format!("[{}]", entry.analyzed_at.format("%H:%M:%S")).dimmed(),
                format!("{} {}", entry.result.label, entry.result.confidence_display()).bold(),
                entry.text
            );
        }
        println!();
    }

    /// Show session counters and current state
    pub fn show_status(
        &self,
        stats: &SessionStats,
        state: &UiState,
        health: Option<HealthStatus>,
    ) {
        self.show_section("Session Status");
        println!("  {}", cached_status_line(health.map(|h| h.available)));
        println!("  Submissions: {}", stats.submissions);
        println!("  Succeeded:   {}", stats.succeeded.to_string().green());
        println!("  Failed:      {}", stats.failed.to_string().red());
        let showing = match ResultView::from_state(state) {
            Some(view) => format!("{} ({})", view.label, view.confidence),
            None => "nothing".to_string(),
        };
        println!("  Showing:     {}", showing);
        println!();
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Clear screen
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("{}", title.bold().cyan());
        println!("{}", "-".repeat(60).cyan());
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}
