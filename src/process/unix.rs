use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::{IntoRawFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use log::{debug, trace};
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{close, dup2, execvp, fork, getpid, ForkResult, Pid};

use super::{ChildEvent, ChildState, ProcessControl, ProcessError};
use crate::syntax::Command;

/// Exit code of a child that could not set up a redirection.
const REDIRECT_FAILURE: i32 = 1;
/// Exit code of a child whose program could not be executed.
const EXEC_FAILURE: i32 = 2;

const OUTPUT_MODE: u32 = 0o600;

/// [`ProcessControl`] backed by fork/exec and waitpid.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixProcessControl;

impl UnixProcessControl {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessControl for UnixProcessControl {
    fn spawn(&mut self, command: &Command) -> Result<Pid, ProcessError> {
        let argv = command
            .argv
            .iter()
            .map(|arg| {
                CString::new(arg.as_bytes())
                    .map_err(|_| ProcessError::InvalidArgument(arg.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if argv.is_empty() {
            return Err(ProcessError::EmptyCommand);
        }

        // SAFETY: the child only sets up descriptors and execs or exits.
        match unsafe { fork() }.map_err(ProcessError::Fork)? {
            ForkResult::Parent { child } => {
                debug!("spawned {} for {:?}", child, command.argv);
                Ok(child)
            }
            ForkResult::Child => exec_child(command, &argv),
        }
    }

    fn try_wait(&mut self, pid: Option<Pid>) -> Result<Option<ChildEvent>, ProcessError> {
        let flags = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED;
        match waitpid(pid, Some(flags)) {
            Ok(status) => Ok(child_event(status)),
            Err(Errno::ECHILD) | Err(Errno::EINTR) => Ok(None),
            Err(e) => Err(ProcessError::Wait(e)),
        }
    }

    fn wait(&mut self, pid: Pid) -> Result<ChildEvent, ProcessError> {
        loop {
            match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
                Ok(status) => {
                    if let Some(event) = child_event(status) {
                        return Ok(event);
                    }
                    trace!("ignoring {:?} while waiting for {}", status, pid);
                }
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(ProcessError::Wait(e)),
            }
        }
    }

    fn kill(&mut self, pid: Pid, signal: Signal) -> Result<(), ProcessError> {
        kill(pid, signal).map_err(|source| ProcessError::Signal {
            pid,
            signal,
            source,
        })
    }

    fn shell_pid(&self) -> Pid {
        getpid()
    }
}

fn child_event(status: WaitStatus) -> Option<ChildEvent> {
    match status {
        WaitStatus::Exited(pid, code) => Some(ChildEvent::new(pid, ChildState::Exited(code))),
        WaitStatus::Signaled(pid, signal, _) => {
            Some(ChildEvent::new(pid, ChildState::Signaled(signal)))
        }
        WaitStatus::Stopped(pid, signal) => Some(ChildEvent::new(pid, ChildState::Stopped(signal))),
        _ => None,
    }
}

/// Runs in the forked child. Never returns.
fn exec_child(command: &Command, argv: &[CString]) -> ! {
    if let Some(path) = &command.input_path {
        if let Err(e) = redirect(File::open(path), libc::STDIN_FILENO) {
            report_redirect_failure(path, &e);
            exit_child(REDIRECT_FAILURE);
        }
    }

    if let Some(path) = &command.output_path {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(OUTPUT_MODE)
            .open(path);
        if let Err(e) = redirect(file, libc::STDOUT_FILENO) {
            report_redirect_failure(path, &e);
            exit_child(REDIRECT_FAILURE);
        }
    }

    let Some(program) = argv.first() else {
        exit_child(EXEC_FAILURE);
    };
    let error = match execvp(program, argv) {
        Ok(never) => match never {},
        Err(e) => e,
    };
    eprintln!("atrium: {}: {}", program.to_string_lossy(), error.desc());
    exit_child(EXEC_FAILURE)
}

/// Moves the opened file onto `target` and closes the original descriptor.
fn redirect(file: io::Result<File>, target: RawFd) -> io::Result<()> {
    let fd = file?.into_raw_fd();
    if fd != target {
        let duplicated = dup2(fd, target);
        let _ = close(fd);
        duplicated?;
    }
    Ok(())
}

fn report_redirect_failure(path: &Path, error: &io::Error) {
    eprintln!("atrium: cannot open \"{}\": {}", path.display(), error);
}

fn exit_child(code: i32) -> ! {
    // SAFETY: `_exit` skips the parent's atexit handlers and buffered output,
    // which the child must not run or flush twice.
    unsafe { libc::_exit(code) }
}
