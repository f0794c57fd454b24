use nix::unistd::Pid;

use super::jobs::{JobStatus, JobTable};
use crate::process::ChildState;

/// Mutable state shared by every stage of the read-eval loop.
#[derive(Debug, Clone, Default)]
pub struct ShellState {
    last_foreground_status: i32,
    last_background_pid: Option<Pid>,
    jobs: JobTable,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit status of the last foreground command, `128 + signal` if it was
    /// killed. Zero until a foreground command has finished.
    pub fn last_foreground_status(&self) -> i32 {
        self.last_foreground_status
    }

    pub fn last_background_pid(&self) -> Option<Pid> {
        self.last_background_pid
    }

    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    pub fn jobs_mut(&mut self) -> &mut JobTable {
        &mut self.jobs
    }

    /// Records how a waited-for foreground child finished. A stop carries no
    /// status and leaves the value unchanged.
    pub fn record_foreground(&mut self, child: ChildState) {
        if let Some(status) = child.status_code() {
            self.last_foreground_status = status;
        }
    }

    /// Starts tracking a child launched in (or moved to) the background.
    pub fn track_job(&mut self, pid: Pid, status: JobStatus) {
        self.jobs.insert(pid, status);
        self.last_background_pid = Some(pid);
    }

    /// Notes a background launch whose child already finished, so there is
    /// nothing left to track.
    pub fn record_finished_launch(&mut self, pid: Pid) {
        self.last_background_pid = Some(pid);
    }
}
