//! In-memory fakes for driving the shell in unit tests.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::unistd::Pid;

use crate::core::commands::WorkingDirectory;
use crate::process::{ChildEvent, ChildState, ProcessControl, ProcessError};
use crate::syntax::Command;

pub const SHELL_PID: i32 = 4242;
pub const FIRST_CHILD_PID: i32 = 1000;

#[derive(Debug, Default)]
struct FakeState {
    spawned: Vec<Command>,
    foreground: VecDeque<ChildState>,
    quick_exits: VecDeque<ChildState>,
    events: VecDeque<ChildEvent>,
    signals: Vec<(Pid, Signal)>,
    blocking_waits: usize,
    fail_spawn: bool,
}

impl FakeState {
    fn pid_of(index: usize) -> Pid {
        Pid::from_raw(FIRST_CHILD_PID + index as i32)
    }

    fn has_spawned(&self, pid: Pid) -> bool {
        pid.as_raw() < FIRST_CHILD_PID
            || (pid.as_raw() - FIRST_CHILD_PID) < self.spawned.len() as i32
    }
}

/// Scripted [`ProcessControl`]. Children get pids from 1000 upwards; clones
/// share the same script and history.
#[derive(Debug, Clone, Default)]
pub struct FakeProcessControl {
    state: Rc<RefCell<FakeState>>,
}

impl FakeProcessControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result of the next blocking wait. Unscripted waits see `Exited(0)`.
    pub fn with_foreground(self, child: ChildState) -> Self {
        self.state.borrow_mut().foreground.push_back(child);
        self
    }

    /// Makes the next background launch finish before it is confirmed.
    pub fn with_quick_exit(self, child: ChildState) -> Self {
        self.state.borrow_mut().quick_exits.push_back(child);
        self
    }

    /// Queues an event for polls of any child. It is held back until its pid
    /// has been spawned.
    pub fn with_event(self, event: ChildEvent) -> Self {
        self.state.borrow_mut().events.push_back(event);
        self
    }

    pub fn failing_spawn(self) -> Self {
        self.state.borrow_mut().fail_spawn = true;
        self
    }

    pub fn spawned(&self) -> Vec<Command> {
        self.state.borrow().spawned.clone()
    }

    pub fn last_pid(&self) -> Option<Pid> {
        let spawned = self.state.borrow().spawned.len();
        spawned.checked_sub(1).map(FakeState::pid_of)
    }

    pub fn signals(&self) -> Vec<(Pid, Signal)> {
        self.state.borrow().signals.clone()
    }

    pub fn blocking_waits(&self) -> usize {
        self.state.borrow().blocking_waits
    }
}

impl ProcessControl for FakeProcessControl {
    fn spawn(&mut self, command: &Command) -> Result<Pid, ProcessError> {
        let mut state = self.state.borrow_mut();
        if state.fail_spawn {
            return Err(ProcessError::Fork(Errno::EAGAIN));
        }
        let pid = FakeState::pid_of(state.spawned.len());
        state.spawned.push(command.clone());
        Ok(pid)
    }

    fn try_wait(&mut self, pid: Option<Pid>) -> Result<Option<ChildEvent>, ProcessError> {
        let mut state = self.state.borrow_mut();
        match pid {
            Some(pid) => Ok(state
                .quick_exits
                .pop_front()
                .map(|child| ChildEvent::new(pid, child))),
            None => {
                let ready = state
                    .events
                    .front()
                    .is_some_and(|event| state.has_spawned(event.pid));
                Ok(if ready { state.events.pop_front() } else { None })
            }
        }
    }

    fn wait(&mut self, pid: Pid) -> Result<ChildEvent, ProcessError> {
        let mut state = self.state.borrow_mut();
        state.blocking_waits += 1;
        let child = state.foreground.pop_front().unwrap_or(ChildState::Exited(0));
        Ok(ChildEvent::new(pid, child))
    }

    fn kill(&mut self, pid: Pid, signal: Signal) -> Result<(), ProcessError> {
        self.state.borrow_mut().signals.push((pid, signal));
        Ok(())
    }

    fn shell_pid(&self) -> Pid {
        Pid::from_raw(SHELL_PID)
    }
}

#[derive(Debug, Default)]
struct DirectoryState {
    current: PathBuf,
    missing: HashSet<PathBuf>,
    changes: usize,
}

/// [`WorkingDirectory`] that only records where the shell would be.
#[derive(Debug, Clone, Default)]
pub struct FakeDirectory {
    state: Rc<RefCell<DirectoryState>>,
}

impl FakeDirectory {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        let directory = Self::default();
        directory.state.borrow_mut().current = start.into();
        directory
    }

    pub fn with_missing(self, path: impl Into<PathBuf>) -> Self {
        self.state.borrow_mut().missing.insert(path.into());
        self
    }

    pub fn current(&self) -> PathBuf {
        self.state.borrow().current.clone()
    }

    pub fn changes(&self) -> usize {
        self.state.borrow().changes
    }
}

impl WorkingDirectory for FakeDirectory {
    fn change_to(&mut self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.missing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            ));
        }
        state.current = path.to_path_buf();
        state.changes += 1;
        Ok(())
    }
}

/// A `Write` sink whose clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
