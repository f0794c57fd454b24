use std::collections::HashMap;

use nix::unistd::Pid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Stopped,
}

/// A background or stopped child the shell still has to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: Pid,
    pub status: JobStatus,
}

/// Registry of tracked children, keyed by pid.
#[derive(Debug, Clone, Default)]
pub struct JobTable {
    entries: HashMap<Pid, ProcessEntry>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `pid`, replacing any previous entry for it.
    pub fn insert(&mut self, pid: Pid, status: JobStatus) -> Option<ProcessEntry> {
        self.entries.insert(pid, ProcessEntry { pid, status })
    }

    pub fn remove(&mut self, pid: Pid) -> Option<ProcessEntry> {
        self.entries.remove(&pid)
    }

    pub fn mark_stopped(&mut self, pid: Pid) {
        self.entries
            .entry(pid)
            .and_modify(|entry| entry.status = JobStatus::Stopped)
            .or_insert(ProcessEntry {
                pid,
                status: JobStatus::Stopped,
            });
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessEntry> {
        self.entries.get(&pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.contains_key(&pid)
    }

    /// Tracked pids in ascending order.
    pub fn pids(&self) -> Vec<Pid> {
        let mut pids: Vec<Pid> = self.entries.keys().copied().collect();
        pids.sort_by_key(|pid| pid.as_raw());
        pids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
