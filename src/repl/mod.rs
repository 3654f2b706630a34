//! Interactive mode
//!
//! The terminal counterpart of the prediction form: each line of text is
//! submitted, `/clear` resets the result, `/health` shows the API status.
//! Text that itself starts with `/` goes through `/predict <text>`.

pub mod commands;
pub mod display;
pub mod input;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::prediction::{PredictionOrchestrator, SubmitOutcome};
use crate::repl::commands::{analyze, is_command, CommandHandler};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::InputHandler;

/// REPL session coordinator
pub struct ReplSession {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    display_manager: DisplayManager,
    orchestrator: Arc<PredictionOrchestrator>,
}

impl ReplSession {
    /// Create new REPL session
    pub fn new(orchestrator: Arc<PredictionOrchestrator>, display: DisplayManager) -> Result<Self> {
        Ok(ReplSession {
            input_handler: InputHandler::new()?,
            command_handler: CommandHandler::new(),
            display_manager: display,
            orchestrator,
        })
    }

    /// Create REPL session with persistent history
    pub fn with_history(
        orchestrator: Arc<PredictionOrchestrator>,
        display: DisplayManager,
        history_path: PathBuf,
    ) -> Result<Self> {
        Ok(ReplSession {
            input_handler: InputHandler::with_history(history_path)?,
            command_handler: CommandHandler::new(),
            display_manager: display,
            orchestrator,
        })
    }

    /// Show welcome banner, probing the backend once
    pub async fn show_welcome(&self, version: &str) {
        let available = self.orchestrator.health().is_available().await;
        self.display_manager
            .show_banner(version, self.orchestrator.health().location(), available);
    }

    /// Handle one line of input
    ///
    /// Returns true if the session should continue, false to exit
    pub async fn handle_input(&mut self, input: &str) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(true);
        }

        if is_command(input) {
            let command = self.command_handler.parse(input);
            debug!(?command, "repl command");
            return self
                .command_handler
                .execute(command, &self.orchestrator, &self.display_manager)
                .await;
        }

        self.predict(input).await;
        Ok(true)
    }

    /// Submit text and render the outcome
    pub async fn predict(&self, text: &str) -> SubmitOutcome {
        analyze(&self.orchestrator, &self.display_manager, text).await
    }

    /// Main loop until `/exit` or EOF
    pub async fn run(&mut self) -> Result<()> {
        loop {
            match self.input_handler.read_line() {
                Ok(Some(input)) => match self.handle_input(&input).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => self.display_manager.show_error(&format!("{}", e)),
                },
                Ok(None) => break,
                Err(e) => {
                    if e.to_string().contains("Interrupted") {
                        println!("\nUse /exit to quit gracefully");
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        self.save()
    }

    /// Save input history
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()
    }
}
