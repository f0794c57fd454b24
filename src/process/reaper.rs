use std::io::Write;

use log::debug;
use nix::sys::signal::Signal;

use super::{ChildEvent, ChildState, ProcessControl, ProcessError};
use crate::core::state::ShellState;

/// Polls once, without blocking, for a state change of any child.
///
/// A finished child is reported and dropped from the job table. A stopped one
/// is continued, reported, and kept as stopped. Only a single event is handled
/// per call; anything else waits for the next prompt.
pub fn reap_once(
    state: &mut ShellState,
    processes: &mut dyn ProcessControl,
    diagnostics: &mut dyn Write,
) -> Result<Option<ChildEvent>, ProcessError> {
    let Some(event) = processes.try_wait(None)? else {
        return Ok(None);
    };
    debug!("reaped {:?}", event);

    match event.state {
        ChildState::Exited(_) | ChildState::Signaled(_) => {
            state.jobs_mut().remove(event.pid);
        }
        ChildState::Stopped(_) => {
            processes.kill(event.pid, Signal::SIGCONT)?;
            state.jobs_mut().mark_stopped(event.pid);
        }
    }
    writeln!(diagnostics, "{event}")?;

    Ok(Some(event))
}
