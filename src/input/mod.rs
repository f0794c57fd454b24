mod editor;
mod stream;

pub use editor::EditorInput;
pub use stream::StreamInput;

use std::io::{self, IsTerminal};

use crate::error::ShellError;
use crate::flags::Flags;

/// Result of asking for the next command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line without its terminator.
    Line(String),
    /// The read was cut short by a signal; prompt again.
    Interrupted,
    /// No more input.
    Eof,
}

pub trait LineSource {
    /// Shows `prompt` and reads one line.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError>;
}

/// Picks the line editor for terminals and plain buffered stdin otherwise.
pub fn open(flags: &Flags) -> Result<Box<dyn LineSource>, ShellError> {
    if !flags.no_editor && io::stdin().is_terminal() {
        Ok(Box::new(EditorInput::new()?))
    } else {
        Ok(Box::new(StreamInput::new(io::stdin().lock(), io::stderr())))
    }
}
