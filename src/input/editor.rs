use log::warn;
use rustyline::config::{Behavior, Configurer};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

use super::{LineSource, ReadOutcome};
use crate::error::ShellError;

/// Line editing for interactive terminals. History lives in memory only.
pub struct EditorInput {
    editor: DefaultEditor,
}

impl EditorInput {
    pub fn new() -> Result<Self, ShellError> {
        // Prompt and echo go to the terminal, never to stdout.
        let config = Config::builder().behavior(Behavior::PreferTerm).build();
        let mut editor = DefaultEditor::with_config(config)?;
        editor.set_auto_add_history(false);
        Ok(Self { editor })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        warn!("Couldn't add to history: {}", e);
                    }
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e.into()),
        }
    }
}
