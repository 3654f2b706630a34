//! Input handler for the REPL using rustyline
//!
//! Provides line editing and persistent history.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Default prompt
pub const DEFAULT_PROMPT: &str = "sarkas> ";

/// Readline interface and command history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    /// Create new input handler
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;

        Ok(InputHandler {
            editor,
            history_path: None,
            prompt: DEFAULT_PROMPT.to_string(),
        })
    }

    /// Create input handler with persistent history
    ///
    /// History file: ~/.sarcasm-detector/history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
            prompt: DEFAULT_PROMPT.to_string(),
        })
    }

    /// Read a line of input
    ///
    /// Returns:
    /// - Ok(Some(line)) for normal input, untrimmed
    /// - Ok(None) for EOF (Ctrl-D)
    /// - Err on interrupt (Ctrl-C) or other errors
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => Err(anyhow::anyhow!("Interrupted")),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path)?;
        }
        Ok(())
    }
}
