//! Child process control.
//!
//! Everything the shell does to other processes goes through the
//! [`ProcessControl`] trait so the job-control logic in [`executor`] and
//! [`reaper`] can run against a fake in tests. [`UnixProcessControl`] is the
//! real implementation.

use std::fmt;

use nix::sys::signal::Signal;
use nix::unistd::Pid;

use crate::syntax::Command;

pub mod executor;
pub mod reaper;
pub mod signal;
mod unix;

pub use executor::ProcessExecutor;
pub use reaper::reap_once;
pub use unix::UnixProcessControl;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),
    #[error("waitpid failed: {0}")]
    Wait(#[source] nix::Error),
    #[error("cannot send {signal:?} to {pid}: {source}")]
    Signal {
        pid: Pid,
        signal: Signal,
        source: nix::Error,
    },
    #[error("argument contains a NUL byte: {0:?}")]
    InvalidArgument(String),
    #[error("empty command")]
    EmptyCommand,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a child changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildState {
    Exited(i32),
    Signaled(Signal),
    Stopped(Signal),
}

impl ChildState {
    /// Value exposed as `$?`: the exit code, or `128 + signal` for a killed
    /// child. Stops have none.
    pub fn status_code(self) -> Option<i32> {
        match self {
            Self::Exited(code) => Some(code),
            Self::Signaled(signal) => Some(128 + signal as i32),
            Self::Stopped(_) => None,
        }
    }

    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Stopped(_))
    }
}

/// A state change observed by waiting on a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildEvent {
    pub pid: Pid,
    pub state: ChildState,
}

impl ChildEvent {
    pub fn new(pid: Pid, state: ChildState) -> Self {
        Self { pid, state }
    }
}

/// The job notice printed on the diagnostic stream.
impl fmt::Display for ChildEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            ChildState::Exited(code) => {
                write!(f, "Child process {} done. Exit status {}.", self.pid, code)
            }
            ChildState::Signaled(signal) => {
                write!(f, "Child process {} done. Signaled {}.", self.pid, signal as i32)
            }
            ChildState::Stopped(_) => write!(f, "Child process {} stopped. Continuing.", self.pid),
        }
    }
}

pub trait ProcessControl {
    /// Starts `command` in a new child process with its redirections applied.
    fn spawn(&mut self, command: &Command) -> Result<Pid, ProcessError>;

    /// Non-blocking wait on `pid`, or on any child when `None`. Stops are
    /// reported. Returns `None` if nothing changed or there are no children.
    fn try_wait(&mut self, pid: Option<Pid>) -> Result<Option<ChildEvent>, ProcessError>;

    /// Blocks until `pid` exits, is killed or stops.
    fn wait(&mut self, pid: Pid) -> Result<ChildEvent, ProcessError>;

    fn kill(&mut self, pid: Pid, signal: Signal) -> Result<(), ProcessError>;

    /// Pid of the shell itself.
    fn shell_pid(&self) -> Pid;
}
