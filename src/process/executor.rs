use std::io::Write;

use log::{debug, info};
use nix::sys::signal::Signal;
use nix::unistd::Pid;

use super::{ChildEvent, ChildState, ProcessControl, ProcessError};
use crate::core::jobs::JobStatus;
use crate::core::state::ShellState;
use crate::syntax::Command;

/// Launches external commands and keeps [`ShellState`] in step with them.
pub struct ProcessExecutor<'a> {
    processes: &'a mut dyn ProcessControl,
    diagnostics: &'a mut dyn Write,
}

impl<'a> ProcessExecutor<'a> {
    pub fn new(processes: &'a mut dyn ProcessControl, diagnostics: &'a mut dyn Write) -> Self {
        Self {
            processes,
            diagnostics,
        }
    }

    pub fn spawn_process(
        &mut self,
        command: &Command,
        state: &mut ShellState,
    ) -> Result<(), ProcessError> {
        let pid = self.processes.spawn(command)?;

        if command.run_in_background {
            self.track_background(pid, state)
        } else {
            self.wait_foreground(pid, state)
        }
    }

    fn wait_foreground(&mut self, pid: Pid, state: &mut ShellState) -> Result<(), ProcessError> {
        let event = self.processes.wait(pid)?;
        debug!("foreground {} finished waiting: {:?}", pid, event.state);

        if let ChildState::Stopped(_) = event.state {
            info!("moving stopped foreground child {} to the background", pid);
            self.resume(event)?;
            state.track_job(pid, JobStatus::Stopped);
        } else {
            state.record_foreground(event.state);
        }
        Ok(())
    }

    fn track_background(&mut self, pid: Pid, state: &mut ShellState) -> Result<(), ProcessError> {
        match self.processes.try_wait(Some(pid))? {
            None => state.track_job(pid, JobStatus::Running),
            Some(event) if event.state.is_finished() => {
                writeln!(self.diagnostics, "{event}")?;
                state.record_finished_launch(pid);
            }
            Some(event) => {
                self.resume(event)?;
                state.track_job(pid, JobStatus::Stopped);
            }
        }
        debug!("background child {} launched", pid);
        Ok(())
    }

    fn resume(&mut self, event: ChildEvent) -> Result<(), ProcessError> {
        self.processes.kill(event.pid, Signal::SIGCONT)?;
        writeln!(self.diagnostics, "{event}")?;
        Ok(())
    }
}
