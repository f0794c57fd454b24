use std::collections::BTreeMap;
use std::path::PathBuf;

mod cd;
mod exit;

pub use cd::{CdCommand, ProcessDirectory, WorkingDirectory};
pub use exit::ExitCommand;

use crate::core::env::{EnvError, ShellEnv};
use crate::core::state::ShellState;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("exit: argument is not an integer: {0}")]
    NotAnInteger(String),
    #[error("cd: {}: {source}", .path.display())]
    ChangeDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cd: {0}")]
    Env(#[from] EnvError),
}

/// What the read-eval loop should do after a builtin ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// Everything a builtin may look at or change.
pub struct Context<'a> {
    pub state: &'a mut ShellState,
    pub env: &'a ShellEnv,
    pub directory: &'a mut dyn WorkingDirectory,
}

pub trait Command {
    fn execute(&self, args: &[String], context: &mut Context<'_>) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], context: &mut Context<'_>) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, context),
            CommandType::Exit(cmd) => cmd.execute(args, context),
        }
    }
}

/// Commands the shell runs itself instead of spawning a process.
#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        Self { commands }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Runs `name` if it is a builtin. Returns `None` for anything else.
    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        context: &mut Context<'_>,
    ) -> Option<Result<Flow, CommandError>> {
        self.commands
            .get(name)
            .map(|command| command.execute(args, context))
    }
}
