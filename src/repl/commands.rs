//! Command handler for REPL built-in commands

use anyhow::Result;
use colored::*;

use crate::prediction::{PredictionOrchestrator, SubmitOutcome};
use crate::repl::display::DisplayManager;

/// Default number of history entries shown
const DEFAULT_HISTORY_LIMIT: usize = 10;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Health,
    Retry,
    History { limit: Option<usize> },
    Status,
    Predict { text: String },
    Cls,
    Exit,
    Unknown { input: String },
}

/// Parses and executes REPL commands
pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        CommandHandler
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        if !trimmed.starts_with('/') {
            return Command::Unknown {
                input: input.to_string(),
            };
        }

        let body = &trimmed[1..];
        let parts: Vec<&str> = body.split_whitespace().collect();
        if parts.is_empty() {
            return Command::Unknown {
                input: input.to_string(),
            };
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "clear" | "reset" | "another" => Command::Clear,
            "health" | "api" => Command::Health,
            "retry" => Command::Retry,
            "history" => {
                let limit = parts.get(1).and_then(|s| s.parse().ok());
                Command::History { limit }
            }
            "status" => Command::Status,
            "predict" | "p" => {
                let text = body
                    .split_once(char::is_whitespace)
                    .map(|(_, rest)| rest.trim_start())
                    .unwrap_or("");
                Command::Predict {
                    text: text.to_string(),
                }
            }
            "cls" => Command::Cls,
            "exit" | "quit" | "q" => Command::Exit,
            _ => Command::Unknown {
                input: input.to_string(),
            },
        }
    }

    /// Execute a command
    ///
    /// Returns true if the REPL should continue, false if it should exit
    pub async fn execute(
        &self,
        command: Command,
        orchestrator: &PredictionOrchestrator,
        display: &DisplayManager,
    ) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Clear => {
                orchestrator.clear();
                display.show_info("Cleared. Ready to analyze another text.");
                Ok(true)
            }
            Command::Health => {
                let available = orchestrator.health().is_available().await;
                display.show_health(orchestrator.health().location(), available);
                Ok(true)
            }
            Command::Retry => {
                orchestrator.health().invalidate().await;
                let available = orchestrator.health().is_available().await;
                display.show_health(orchestrator.health().location(), available);
                Ok(true)
            }
            Command::History { limit } => {
                let entries = orchestrator
                    .session()
                    .history(limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
                display.show_history(&entries);
                Ok(true)
            }
            Command::Status => {
                let session = orchestrator.session();
                let health = orchestrator.health().peek().await;
                display.show_status(&session.stats(), &session.snapshot(), health);
                Ok(true)
            }
            Command::Predict { text } => {
                analyze(orchestrator, display, &text).await;
                Ok(true)
            }
            Command::Cls => {
                display.clear_screen()?;
                Ok(true)
            }
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                Ok(false)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
        }
    }

    /// Display help information
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = [
            ("/help, /h", "Show this help message"),
            ("/clear, /another", "Clear the result and analyze another text"),
            ("/health, /api", "Show API status"),
            ("/retry", "Re-check the backend connection"),
            ("/history [n]", "Show last n predictions (default: 10)"),
            ("/status", "Show session statistics and cached API status"),
            ("/predict <text>, /p", "Analyze text that starts with /"),
            ("/cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - Type Indonesian text directly (no / prefix) to predict");
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Submit text with the spinner running, then render the outcome
pub async fn analyze(
    orchestrator: &PredictionOrchestrator,
    display: &DisplayManager,
    text: &str,
) -> SubmitOutcome {
    let spinner = display.start_analyzing();
    let outcome = orchestrator.submit(text).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    display.show_outcome(&outcome, &orchestrator.session().snapshot());
    outcome
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}
