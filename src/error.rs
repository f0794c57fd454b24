use std::io;

use rustyline::error::ReadlineError;

use crate::core::commands::CommandError;
use crate::process::ProcessError;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),
    #[error("{0}")]
    Command(#[from] CommandError),
    #[error("Ctrl-C error: {0}")]
    CtrlC(#[from] ctrlc::Error),
}

impl ShellError {
    /// True when a line was read but could not be decoded. Only that line is
    /// lost, so it never counts as the input going away.
    pub fn is_undecodable_line(&self) -> bool {
        match self {
            Self::Io(e) | Self::Readline(ReadlineError::Io(e)) => {
                e.kind() == io::ErrorKind::InvalidData
            }
            _ => false,
        }
    }
}
